use async_trait::async_trait;
use mockall::automock;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::resume::{Resume, ResumeInsert, UpdateResume},
    errors::AppError,
    repositories::sqlx_repo::SqlxResumeRepo,
};

#[automock]
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Inserts a new résumé row.
    async fn create_resume(&self, insert: &ResumeInsert) -> Result<Resume, AppError>;

    /// Owner-scoped lookup.
    async fn fetch_resume(&self, id: &Uuid, candidate_id: &Uuid)
        -> Result<Option<Resume>, AppError>;

    /// Owning candidate of a résumé, if the row exists at all.
    async fn resume_owner(&self, id: &Uuid) -> Result<Option<Uuid>, AppError>;

    /// Applies a partial update and bumps `updated_at`.
    async fn update_resume(
        &self,
        id: &Uuid,
        candidate_id: &Uuid,
        update: &UpdateResume,
    ) -> Result<Resume, AppError>;

    /// Demotes any current primary of the candidate and promotes the target,
    /// atomically. Either both steps commit or neither does.
    async fn set_primary_resume(&self, id: &Uuid, candidate_id: &Uuid)
        -> Result<Resume, AppError>;

    /// All résumés of a candidate, newest-updated first.
    async fn list_resumes_by_candidate(&self, candidate_id: &Uuid)
        -> Result<Vec<Resume>, AppError>;

    /// Owner-scoped delete. No replacement primary is selected when the
    /// deleted row was the primary one.
    async fn delete_resume(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError>;
}

impl SqlxResumeRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxResumeRepo { pool }
    }
}

#[async_trait]
impl ResumeRepository for SqlxResumeRepo {
    async fn create_resume(&self, insert: &ResumeInsert) -> Result<Resume, AppError> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (
                id,
                candidate_id,
                title,
                layout,
                content,
                style,
                is_public,
                is_primary,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(insert.id)
        .bind(insert.candidate_id)
        .bind(&insert.title)
        .bind(insert.layout)
        .bind(Json(&insert.content))
        .bind(insert.style.as_ref().map(Json))
        .bind(insert.is_public)
        .bind(insert.is_primary)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(resume)
    }

    async fn fetch_resume(
        &self,
        id: &Uuid,
        candidate_id: &Uuid,
    ) -> Result<Option<Resume>, AppError> {
        let resume = sqlx::query_as::<_, Resume>(
            "SELECT * FROM resumes WHERE id = $1 AND candidate_id = $2",
        )
        .bind(id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resume)
    }

    async fn resume_owner(&self, id: &Uuid) -> Result<Option<Uuid>, AppError> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT candidate_id FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(owner)
    }

    async fn update_resume(
        &self,
        id: &Uuid,
        candidate_id: &Uuid,
        update: &UpdateResume,
    ) -> Result<Resume, AppError> {
        let style_touched = !update.style.is_unchanged();
        let style_value = update.style.flatten_ref().map(Json);

        let resume = sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                layout = COALESCE($5, layout),
                style = CASE WHEN $6 THEN $7 ELSE style END,
                is_public = COALESCE($8, is_public),
                updated_at = NOW()
            WHERE id = $1 AND candidate_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(candidate_id)
        .bind(update.title.as_deref())
        .bind(update.content.as_ref().map(Json))
        .bind(update.layout)
        .bind(style_touched)
        .bind(style_value)
        .bind(update.is_public)
        .fetch_optional(&self.pool)
        .await?;

        resume.ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
    }

    async fn set_primary_resume(
        &self,
        id: &Uuid,
        candidate_id: &Uuid,
    ) -> Result<Resume, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent promotions for the same candidate; the
        // partial unique index on (candidate_id) WHERE is_primary backstops
        // the invariant if a competing writer slips past this lock.
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM candidates WHERE id = $1 FOR UPDATE")
                .bind(candidate_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(AppError::NotFound("Candidate not found".to_string()));
        }

        sqlx::query(
            r#"
            UPDATE resumes
            SET is_primary = FALSE, updated_at = NOW()
            WHERE candidate_id = $1 AND is_primary = TRUE AND id <> $2
            "#,
        )
        .bind(candidate_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let promoted = sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET is_primary = TRUE, updated_at = NOW()
            WHERE id = $1 AND candidate_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(candidate_id)
        .fetch_optional(&mut *tx)
        .await?;

        match promoted {
            Some(resume) => {
                tx.commit().await?;
                Ok(resume)
            }
            // Dropping the transaction rolls back the demotion, leaving the
            // previous primary intact.
            None => Err(AppError::NotFound("Resume not found".to_string())),
        }
    }

    async fn list_resumes_by_candidate(
        &self,
        candidate_id: &Uuid,
    ) -> Result<Vec<Resume>, AppError> {
        let resumes = sqlx::query_as::<_, Resume>(
            "SELECT * FROM resumes WHERE candidate_id = $1 ORDER BY updated_at DESC",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(resumes)
    }

    async fn delete_resume(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND candidate_id = $2")
            .bind(id)
            .bind(candidate_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Resume not found".to_string()));
        }

        Ok(())
    }
}
