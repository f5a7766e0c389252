use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxResumeRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCandidateRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxTemplateRepo {
    pub pool: PgPool,
}
