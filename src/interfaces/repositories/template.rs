use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    entities::template::ResumeTemplate,
    errors::AppError,
    repositories::sqlx_repo::SqlxTemplateRepo,
};

#[automock]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Public templates, newest first. Templates are read-only here; a résumé
    /// copies layout and style out of one rather than referencing it.
    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, AppError>;

    async fn fetch_template(&self, id: &Uuid) -> Result<Option<ResumeTemplate>, AppError>;
}

impl SqlxTemplateRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxTemplateRepo { pool }
    }
}

#[async_trait]
impl TemplateRepository for SqlxTemplateRepo {
    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, AppError> {
        let templates = sqlx::query_as::<_, ResumeTemplate>(
            "SELECT * FROM resume_templates WHERE is_public ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    async fn fetch_template(&self, id: &Uuid) -> Result<Option<ResumeTemplate>, AppError> {
        let template = sqlx::query_as::<_, ResumeTemplate>(
            "SELECT * FROM resume_templates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }
}
