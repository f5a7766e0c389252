use async_trait::async_trait;
use mockall::automock;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::{
        candidate::{Candidate, CandidateProfile, UpdateProfile},
        education::Education,
        experience::Experience,
        user::UserIdentity,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxCandidateRepo,
};

#[automock]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;

    async fn candidate_exists(&self, id: &Uuid) -> Result<bool, AppError>;

    /// Candidate plus the user identity and the full experience/education
    /// history, in chronological order. Everything a profile-derived résumé
    /// copies from.
    async fn fetch_profile(&self, candidate_id: &Uuid)
        -> Result<Option<CandidateProfile>, AppError>;

    async fn update_profile(
        &self,
        candidate_id: &Uuid,
        update: &UpdateProfile,
    ) -> Result<Candidate, AppError>;

    async fn list_experiences(&self, candidate_id: &Uuid) -> Result<Vec<Experience>, AppError>;
    async fn insert_experience(&self, experience: &Experience) -> Result<Experience, AppError>;
    async fn fetch_experience(&self, id: &Uuid) -> Result<Option<Experience>, AppError>;
    async fn replace_experience(&self, experience: &Experience) -> Result<Experience, AppError>;
    async fn delete_experience(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError>;

    async fn list_educations(&self, candidate_id: &Uuid) -> Result<Vec<Education>, AppError>;
    async fn insert_education(&self, education: &Education) -> Result<Education, AppError>;
    async fn fetch_education(&self, id: &Uuid) -> Result<Option<Education>, AppError>;
    async fn replace_education(&self, education: &Education) -> Result<Education, AppError>;
    async fn delete_education(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError>;
}

impl SqlxCandidateRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCandidateRepo { pool }
    }
}

#[async_trait]
impl CandidateRepository for SqlxCandidateRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn candidate_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM candidates WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn fetch_profile(
        &self,
        candidate_id: &Uuid,
    ) -> Result<Option<CandidateProfile>, AppError> {
        let candidate = sqlx::query_as::<_, Candidate>(
            "SELECT * FROM candidates WHERE id = $1",
        )
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, UserIdentity>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(candidate.user_id)
        .fetch_one(&self.pool)
        .await?;

        let experiences = self.list_experiences(candidate_id).await?;
        let educations = self.list_educations(candidate_id).await?;

        Ok(Some(CandidateProfile {
            candidate,
            user,
            experiences,
            educations,
        }))
    }

    async fn update_profile(
        &self,
        candidate_id: &Uuid,
        update: &UpdateProfile,
    ) -> Result<Candidate, AppError> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET
                headline = CASE WHEN $2 THEN $3 ELSE headline END,
                bio = CASE WHEN $4 THEN $5 ELSE bio END,
                phone = CASE WHEN $6 THEN $7 ELSE phone END,
                location_city = CASE WHEN $8 THEN $9 ELSE location_city END,
                location_state = CASE WHEN $10 THEN $11 ELSE location_state END,
                location_country = CASE WHEN $12 THEN $13 ELSE location_country END,
                skills = COALESCE($14, skills),
                links = COALESCE($15, links),
                resume_url = CASE WHEN $16 THEN $17 ELSE resume_url END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(!update.headline.is_unchanged())
        .bind(update.headline.flatten_str())
        .bind(!update.bio.is_unchanged())
        .bind(update.bio.flatten_str())
        .bind(!update.phone.is_unchanged())
        .bind(update.phone.flatten_str())
        .bind(!update.location_city.is_unchanged())
        .bind(update.location_city.flatten_str())
        .bind(!update.location_state.is_unchanged())
        .bind(update.location_state.flatten_str())
        .bind(!update.location_country.is_unchanged())
        .bind(update.location_country.flatten_str())
        .bind(update.skills.as_deref())
        .bind(update.links.as_ref().map(Json))
        .bind(!update.resume_url.is_unchanged())
        .bind(update.resume_url.flatten_str())
        .fetch_optional(&self.pool)
        .await?;

        candidate.ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
    }

    async fn list_experiences(&self, candidate_id: &Uuid) -> Result<Vec<Experience>, AppError> {
        let experiences = sqlx::query_as::<_, Experience>(
            r#"
            SELECT * FROM experiences
            WHERE candidate_id = $1
            ORDER BY start_date ASC, created_at ASC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }

    async fn insert_experience(&self, experience: &Experience) -> Result<Experience, AppError> {
        let inserted = sqlx::query_as::<_, Experience>(
            r#"
            INSERT INTO experiences (
                id, candidate_id, title, company, start_date, end_date,
                currently, description, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(experience.id)
        .bind(experience.candidate_id)
        .bind(&experience.title)
        .bind(experience.company.as_deref())
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.currently)
        .bind(experience.description.as_deref())
        .bind(experience.created_at)
        .bind(experience.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn fetch_experience(&self, id: &Uuid) -> Result<Option<Experience>, AppError> {
        let experience =
            sqlx::query_as::<_, Experience>("SELECT * FROM experiences WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(experience)
    }

    async fn replace_experience(&self, experience: &Experience) -> Result<Experience, AppError> {
        let updated = sqlx::query_as::<_, Experience>(
            r#"
            UPDATE experiences
            SET
                title = $3,
                company = $4,
                start_date = $5,
                end_date = $6,
                currently = $7,
                description = $8,
                updated_at = $9
            WHERE id = $1 AND candidate_id = $2
            RETURNING *
            "#,
        )
        .bind(experience.id)
        .bind(experience.candidate_id)
        .bind(&experience.title)
        .bind(experience.company.as_deref())
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.currently)
        .bind(experience.description.as_deref())
        .bind(experience.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
    }

    async fn delete_experience(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM experiences WHERE id = $1 AND candidate_id = $2")
                .bind(id)
                .bind(candidate_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Experience not found".to_string()));
        }

        Ok(())
    }

    async fn list_educations(&self, candidate_id: &Uuid) -> Result<Vec<Education>, AppError> {
        let educations = sqlx::query_as::<_, Education>(
            r#"
            SELECT * FROM educations
            WHERE candidate_id = $1
            ORDER BY start_date ASC NULLS LAST, created_at ASC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(educations)
    }

    async fn insert_education(&self, education: &Education) -> Result<Education, AppError> {
        let inserted = sqlx::query_as::<_, Education>(
            r#"
            INSERT INTO educations (
                id, candidate_id, school, degree, field,
                start_date, end_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(education.id)
        .bind(education.candidate_id)
        .bind(&education.school)
        .bind(education.degree.as_deref())
        .bind(education.field.as_deref())
        .bind(education.start_date)
        .bind(education.end_date)
        .bind(education.created_at)
        .bind(education.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn fetch_education(&self, id: &Uuid) -> Result<Option<Education>, AppError> {
        let education =
            sqlx::query_as::<_, Education>("SELECT * FROM educations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(education)
    }

    async fn replace_education(&self, education: &Education) -> Result<Education, AppError> {
        let updated = sqlx::query_as::<_, Education>(
            r#"
            UPDATE educations
            SET
                school = $3,
                degree = $4,
                field = $5,
                start_date = $6,
                end_date = $7,
                updated_at = $8
            WHERE id = $1 AND candidate_id = $2
            RETURNING *
            "#,
        )
        .bind(education.id)
        .bind(education.candidate_id)
        .bind(&education.school)
        .bind(education.degree.as_deref())
        .bind(education.field.as_deref())
        .bind(education.start_date)
        .bind(education.end_date)
        .bind(education.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Education not found".to_string()))
    }

    async fn delete_education(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM educations WHERE id = $1 AND candidate_id = $2")
                .bind(id)
                .bind(candidate_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Education not found".to_string()));
        }

        Ok(())
    }
}
