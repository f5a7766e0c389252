use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use uuid::Uuid;
use validator::Validate;

use crate::entities::candidate::{Candidate, CandidateProfile, UpdateProfile};
use crate::entities::education::{Education, NewEducation, UpdateEducation};
use crate::entities::experience::{
    check_date_range, Experience, NewExperience, UpdateExperience,
};
use crate::errors::AppError;
use crate::interfaces::repositories::candidate::CandidateRepository;

// Permissive international format; the auth layer owns real verification.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().\-]{4,22}$").expect("valid phone pattern"));

/// Candidate profile management: the data `create_from_profile` copies from.
pub struct ProfileHandler<C>
where
    C: CandidateRepository,
{
    pub candidate_repo: C,
}

impl<C> ProfileHandler<C>
where
    C: CandidateRepository,
{
    pub fn new(candidate_repo: C) -> Self {
        ProfileHandler { candidate_repo }
    }

    pub async fn get_profile(&self, candidate_id: Uuid) -> Result<CandidateProfile, AppError> {
        self.candidate_repo
            .fetch_profile(&candidate_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        candidate_id: Uuid,
        request: UpdateProfile,
    ) -> Result<Candidate, AppError> {
        request.validate()?;

        if let Some(phone) = request.phone.value_ref() {
            if !phone.is_empty() && !PHONE_RE.is_match(phone) {
                return Err(AppError::invalid_field("phone", "Must be a valid phone number"));
            }
        }
        if let Some(links) = &request.links {
            for (label, link) in links {
                if Url::parse(link).is_err() {
                    return Err(AppError::invalid_field(
                        format!("links.{label}"),
                        "Must be a valid URL",
                    ));
                }
            }
        }

        self.candidate_repo.update_profile(&candidate_id, &request).await
    }

    // ----- experiences -----

    pub async fn list_experiences(&self, candidate_id: Uuid) -> Result<Vec<Experience>, AppError> {
        self.ensure_candidate(&candidate_id).await?;
        self.candidate_repo.list_experiences(&candidate_id).await
    }

    pub async fn add_experience(
        &self,
        candidate_id: Uuid,
        request: NewExperience,
    ) -> Result<Experience, AppError> {
        request.validate()?;
        self.ensure_candidate(&candidate_id).await?;

        let experience = request.prepare_for_insert(candidate_id);
        check_date_range(
            Some(experience.start_date),
            experience.end_date,
            "endDate",
        )?;

        self.candidate_repo.insert_experience(&experience).await
    }

    pub async fn update_experience(
        &self,
        id: Uuid,
        candidate_id: Uuid,
        request: UpdateExperience,
    ) -> Result<Experience, AppError> {
        request.validate()?;

        let current = self
            .candidate_repo
            .fetch_experience(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))?;
        if current.candidate_id != candidate_id {
            return Err(AppError::ForbiddenAccess);
        }

        // Validate the range the row would end up with, not the patch alone.
        let updated = request.apply_to(current);
        check_date_range(Some(updated.start_date), updated.end_date, "endDate")?;

        self.candidate_repo.replace_experience(&updated).await
    }

    pub async fn delete_experience(&self, id: Uuid, candidate_id: Uuid) -> Result<(), AppError> {
        let current = self
            .candidate_repo
            .fetch_experience(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))?;
        if current.candidate_id != candidate_id {
            return Err(AppError::ForbiddenAccess);
        }

        self.candidate_repo.delete_experience(&id, &candidate_id).await
    }

    // ----- educations -----

    pub async fn list_educations(&self, candidate_id: Uuid) -> Result<Vec<Education>, AppError> {
        self.ensure_candidate(&candidate_id).await?;
        self.candidate_repo.list_educations(&candidate_id).await
    }

    pub async fn add_education(
        &self,
        candidate_id: Uuid,
        request: NewEducation,
    ) -> Result<Education, AppError> {
        request.validate()?;
        self.ensure_candidate(&candidate_id).await?;

        let education = request.prepare_for_insert(candidate_id);
        check_date_range(education.start_date, education.end_date, "endDate")?;

        self.candidate_repo.insert_education(&education).await
    }

    pub async fn update_education(
        &self,
        id: Uuid,
        candidate_id: Uuid,
        request: UpdateEducation,
    ) -> Result<Education, AppError> {
        request.validate()?;

        let current = self
            .candidate_repo
            .fetch_education(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Education not found".to_string()))?;
        if current.candidate_id != candidate_id {
            return Err(AppError::ForbiddenAccess);
        }

        let updated = request.apply_to(current);
        check_date_range(updated.start_date, updated.end_date, "endDate")?;

        self.candidate_repo.replace_education(&updated).await
    }

    pub async fn delete_education(&self, id: Uuid, candidate_id: Uuid) -> Result<(), AppError> {
        let current = self
            .candidate_repo
            .fetch_education(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Education not found".to_string()))?;
        if current.candidate_id != candidate_id {
            return Err(AppError::ForbiddenAccess);
        }

        self.candidate_repo.delete_education(&id, &candidate_id).await
    }

    async fn ensure_candidate(&self, candidate_id: &Uuid) -> Result<(), AppError> {
        if !self.candidate_repo.candidate_exists(candidate_id).await? {
            return Err(AppError::NotFound("Candidate not found".to_string()));
        }
        Ok(())
    }
}
