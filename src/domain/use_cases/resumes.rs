use uuid::Uuid;
use validator::Validate;

use crate::entities::content::ResumeContent;
use crate::entities::resume::{NewResume, Resume, UpdateResume};
use crate::errors::AppError;
use crate::interfaces::repositories::candidate::CandidateRepository;
use crate::interfaces::repositories::resume::ResumeRepository;

/// The résumé service. Owns the rules for creating, updating, and promoting
/// résumé documents; callers supply an already-authenticated candidate id.
pub struct ResumeHandler<R, C>
where
    R: ResumeRepository,
    C: CandidateRepository,
{
    pub resume_repo: R,
    pub candidate_repo: C,
}

impl<R, C> ResumeHandler<R, C>
where
    R: ResumeRepository,
    C: CandidateRepository,
{
    pub fn new(resume_repo: R, candidate_repo: C) -> Self {
        ResumeHandler {
            resume_repo,
            candidate_repo,
        }
    }

    /// Creates a résumé after structural validation of the document. The new
    /// document is never primary and never public; promoting it is a separate
    /// operation.
    pub async fn create(&self, candidate_id: Uuid, request: NewResume) -> Result<Resume, AppError> {
        request.validate()?;
        request.content.validate()?;

        if !self.candidate_repo.candidate_exists(&candidate_id).await? {
            return Err(AppError::NotFound("Candidate not found".to_string()));
        }

        let insert = request.prepare_for_insert(candidate_id);
        let resume = self.resume_repo.create_resume(&insert).await?;

        tracing::info!(resume_id = %resume.id, "Resume created");
        Ok(resume)
    }

    /// Applies a partial update. A résumé owned by a different candidate is
    /// rejected with `ForbiddenAccess` and left untouched.
    pub async fn update(
        &self,
        id: Uuid,
        candidate_id: Uuid,
        request: UpdateResume,
    ) -> Result<Resume, AppError> {
        request.validate()?;
        if let Some(content) = &request.content {
            content.validate()?;
        }

        self.ensure_owner(&id, &candidate_id).await?;
        self.resume_repo.update_resume(&id, &candidate_id, &request).await
    }

    /// Promotes a résumé to primary, demoting any sibling that currently
    /// holds the flag. The repository performs both steps in one atomic
    /// transaction so two racing promotions for the same candidate can never
    /// both stick. An id that does not belong to the candidate is `NotFound`.
    pub async fn set_primary(&self, id: Uuid, candidate_id: Uuid) -> Result<Resume, AppError> {
        let resume = self.resume_repo.set_primary_resume(&id, &candidate_id).await?;
        tracing::info!(resume_id = %resume.id, "Resume promoted to primary");
        Ok(resume)
    }

    /// Builds a fresh résumé from the candidate's current profile. Every call
    /// produces a new independent document; nothing is deduplicated against
    /// earlier snapshots.
    pub async fn create_from_profile(&self, candidate_id: Uuid) -> Result<Resume, AppError> {
        let profile = self
            .candidate_repo
            .fetch_profile(&candidate_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

        let content = ResumeContent::from_profile(&profile);
        let request = NewResume {
            title: format!("{} - CV", profile.user.display_name()),
            content,
            layout: None,
            style: None,
        };

        let insert = request.prepare_for_insert(candidate_id);
        let resume = self.resume_repo.create_resume(&insert).await?;

        tracing::info!(resume_id = %resume.id, "Resume generated from profile");
        Ok(resume)
    }

    pub async fn list_by_candidate(&self, candidate_id: Uuid) -> Result<Vec<Resume>, AppError> {
        self.resume_repo.list_resumes_by_candidate(&candidate_id).await
    }

    pub async fn get(&self, id: Uuid, candidate_id: Uuid) -> Result<Resume, AppError> {
        self.ensure_owner(&id, &candidate_id).await?;
        self.resume_repo
            .fetch_resume(&id, &candidate_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
    }

    /// Deletes a résumé. When the deleted document was the primary one, no
    /// replacement primary is auto-selected.
    pub async fn delete(&self, id: Uuid, candidate_id: Uuid) -> Result<(), AppError> {
        self.ensure_owner(&id, &candidate_id).await?;
        self.resume_repo.delete_resume(&id, &candidate_id).await
    }

    async fn ensure_owner(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError> {
        match self.resume_repo.resume_owner(id).await? {
            None => Err(AppError::NotFound("Resume not found".to_string())),
            Some(owner) if owner != *candidate_id => Err(AppError::ForbiddenAccess),
            Some(_) => Ok(()),
        }
    }
}
