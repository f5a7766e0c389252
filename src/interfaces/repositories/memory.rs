use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::{
        candidate::{Candidate, CandidateProfile, UpdateProfile},
        education::Education,
        experience::Experience,
        resume::{Resume, ResumeInsert, UpdateResume},
        template::{builtin_templates, ResumeTemplate},
        user::UserIdentity,
    },
    errors::AppError,
    repositories::{
        candidate::CandidateRepository, resume::ResumeRepository, template::TemplateRepository,
    },
};

/// Process-local store backing the repository traits. Used by the test suite
/// and as a zero-dependency backend for local experiments; the promotion path
/// keeps the same per-candidate serialization contract as the Postgres
/// implementation.
pub struct MemoryStore {
    users: DashMap<Uuid, UserIdentity>,
    candidates: DashMap<Uuid, Candidate>,
    experiences: DashMap<Uuid, Experience>,
    educations: DashMap<Uuid, Education>,
    resumes: DashMap<Uuid, Resume>,
    templates: DashMap<Uuid, ResumeTemplate>,
    primary_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        let store = MemoryStore {
            users: DashMap::new(),
            candidates: DashMap::new(),
            experiences: DashMap::new(),
            educations: DashMap::new(),
            resumes: DashMap::new(),
            templates: DashMap::new(),
            primary_locks: DashMap::new(),
        };
        for template in builtin_templates() {
            store.templates.insert(template.id, template);
        }
        Arc::new(store)
    }

    pub fn resume_repo(self: &Arc<Self>) -> MemoryResumeRepo {
        MemoryResumeRepo(self.clone())
    }

    pub fn candidate_repo(self: &Arc<Self>) -> MemoryCandidateRepo {
        MemoryCandidateRepo(self.clone())
    }

    pub fn template_repo(self: &Arc<Self>) -> MemoryTemplateRepo {
        MemoryTemplateRepo(self.clone())
    }

    pub fn insert_user(&self, user: UserIdentity) {
        self.users.insert(user.id, user);
    }

    pub fn insert_candidate(&self, candidate: Candidate) {
        self.candidates.insert(candidate.id, candidate);
    }

    pub fn insert_experience(&self, experience: Experience) {
        self.experiences.insert(experience.id, experience);
    }

    pub fn insert_education(&self, education: Education) {
        self.educations.insert(education.id, education);
    }

    pub fn primary_count(&self, candidate_id: &Uuid) -> usize {
        self.resumes
            .iter()
            .filter(|r| r.candidate_id == *candidate_id && r.is_primary)
            .count()
    }

    fn primary_lock(&self, candidate_id: &Uuid) -> Arc<Mutex<()>> {
        self.primary_locks
            .entry(*candidate_id)
            .or_default()
            .clone()
    }
}

#[derive(Clone)]
pub struct MemoryResumeRepo(pub Arc<MemoryStore>);

#[derive(Clone)]
pub struct MemoryCandidateRepo(pub Arc<MemoryStore>);

#[derive(Clone)]
pub struct MemoryTemplateRepo(pub Arc<MemoryStore>);

#[async_trait]
impl ResumeRepository for MemoryResumeRepo {
    async fn create_resume(&self, insert: &ResumeInsert) -> Result<Resume, AppError> {
        let resume = Resume::from(insert.clone());
        self.0.resumes.insert(resume.id, resume.clone());
        Ok(resume)
    }

    async fn fetch_resume(
        &self,
        id: &Uuid,
        candidate_id: &Uuid,
    ) -> Result<Option<Resume>, AppError> {
        Ok(self
            .0
            .resumes
            .get(id)
            .filter(|r| r.candidate_id == *candidate_id)
            .map(|r| r.clone()))
    }

    async fn resume_owner(&self, id: &Uuid) -> Result<Option<Uuid>, AppError> {
        Ok(self.0.resumes.get(id).map(|r| r.candidate_id))
    }

    async fn update_resume(
        &self,
        id: &Uuid,
        candidate_id: &Uuid,
        update: &UpdateResume,
    ) -> Result<Resume, AppError> {
        let mut entry = self
            .0
            .resumes
            .get_mut(id)
            .filter(|r| r.candidate_id == *candidate_id)
            .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

        let resume = entry.value_mut();
        if let Some(title) = &update.title {
            resume.title = title.clone();
        }
        if let Some(content) = &update.content {
            resume.content = Json(content.clone());
        }
        if let Some(layout) = update.layout {
            resume.layout = layout;
        }
        if !update.style.is_unchanged() {
            resume.style = update.style.clone().flatten().map(Json);
        }
        if let Some(is_public) = update.is_public {
            resume.is_public = is_public;
        }
        resume.updated_at = Utc::now();

        Ok(resume.clone())
    }

    async fn set_primary_resume(
        &self,
        id: &Uuid,
        candidate_id: &Uuid,
    ) -> Result<Resume, AppError> {
        let lock = self.0.primary_lock(candidate_id);
        let _guard = lock.lock();

        let owned = self
            .0
            .resumes
            .get(id)
            .map(|r| r.candidate_id == *candidate_id)
            .unwrap_or(false);
        if !owned {
            return Err(AppError::NotFound("Resume not found".to_string()));
        }

        let now = Utc::now();
        let demoted: Vec<Uuid> = self
            .0
            .resumes
            .iter()
            .filter(|r| r.candidate_id == *candidate_id && r.is_primary && r.id != *id)
            .map(|r| r.id)
            .collect();
        for demoted_id in demoted {
            if let Some(mut entry) = self.0.resumes.get_mut(&demoted_id) {
                entry.is_primary = false;
                entry.updated_at = now;
            }
        }

        let mut entry = self
            .0
            .resumes
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
        entry.is_primary = true;
        entry.updated_at = now;

        Ok(entry.clone())
    }

    async fn list_resumes_by_candidate(
        &self,
        candidate_id: &Uuid,
    ) -> Result<Vec<Resume>, AppError> {
        let mut resumes: Vec<Resume> = self
            .0
            .resumes
            .iter()
            .filter(|r| r.candidate_id == *candidate_id)
            .map(|r| r.clone())
            .collect();
        resumes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(resumes)
    }

    async fn delete_resume(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError> {
        self.0
            .resumes
            .remove_if(id, |_, r| r.candidate_id == *candidate_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
    }
}

#[async_trait]
impl CandidateRepository for MemoryCandidateRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn candidate_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        Ok(self.0.candidates.contains_key(id))
    }

    async fn fetch_profile(
        &self,
        candidate_id: &Uuid,
    ) -> Result<Option<CandidateProfile>, AppError> {
        let Some(candidate) = self.0.candidates.get(candidate_id).map(|c| c.clone()) else {
            return Ok(None);
        };

        let user = self
            .0
            .users
            .get(&candidate.user_id)
            .map(|u| u.clone())
            .ok_or_else(|| {
                AppError::InternalError(format!("User {} missing for candidate", candidate.user_id))
            })?;

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
        let mut entry = self
            .0
            .candidates
            .get_mut(candidate_id)
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

        let candidate = entry.value_mut();
        candidate.headline = update.headline.clone().apply_to(candidate.headline.take());
        candidate.bio = update.bio.clone().apply_to(candidate.bio.take());
        candidate.phone = update.phone.clone().apply_to(candidate.phone.take());
        candidate.location_city = update
            .location_city
            .clone()
            .apply_to(candidate.location_city.take());
        candidate.location_state = update
            .location_state
            .clone()
            .apply_to(candidate.location_state.take());
        candidate.location_country = update
            .location_country
            .clone()
            .apply_to(candidate.location_country.take());
        if let Some(skills) = &update.skills {
            candidate.skills = skills.clone();
        }
        if let Some(links) = &update.links {
            candidate.links = Json(links.clone());
        }
        candidate.resume_url = update
            .resume_url
            .clone()
            .apply_to(candidate.resume_url.take());
        candidate.updated_at = Utc::now();

        Ok(candidate.clone())
    }

    async fn list_experiences(&self, candidate_id: &Uuid) -> Result<Vec<Experience>, AppError> {
        let mut experiences: Vec<Experience> = self
            .0
            .experiences
            .iter()
            .filter(|e| e.candidate_id == *candidate_id)
            .map(|e| e.clone())
            .collect();
        experiences.sort_by_key(|e| (e.start_date, e.created_at));
        Ok(experiences)
    }

    async fn insert_experience(&self, experience: &Experience) -> Result<Experience, AppError> {
        self.0.experiences.insert(experience.id, experience.clone());
        Ok(experience.clone())
    }

    async fn fetch_experience(&self, id: &Uuid) -> Result<Option<Experience>, AppError> {
        Ok(self.0.experiences.get(id).map(|e| e.clone()))
    }

    async fn replace_experience(&self, experience: &Experience) -> Result<Experience, AppError> {
        let mut entry = self
            .0
            .experiences
            .get_mut(&experience.id)
            .filter(|e| e.candidate_id == experience.candidate_id)
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))?;
        *entry.value_mut() = experience.clone();
        Ok(experience.clone())
    }

    async fn delete_experience(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError> {
        self.0
            .experiences
            .remove_if(id, |_, e| e.candidate_id == *candidate_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
    }

    async fn list_educations(&self, candidate_id: &Uuid) -> Result<Vec<Education>, AppError> {
        let mut educations: Vec<Education> = self
            .0
            .educations
            .iter()
            .filter(|e| e.candidate_id == *candidate_id)
            .map(|e| e.clone())
            .collect();
        educations.sort_by_key(|e| (e.start_date, e.created_at));
        Ok(educations)
    }

    async fn insert_education(&self, education: &Education) -> Result<Education, AppError> {
        self.0.educations.insert(education.id, education.clone());
        Ok(education.clone())
    }

    async fn fetch_education(&self, id: &Uuid) -> Result<Option<Education>, AppError> {
        Ok(self.0.educations.get(id).map(|e| e.clone()))
    }

    async fn replace_education(&self, education: &Education) -> Result<Education, AppError> {
        let mut entry = self
            .0
            .educations
            .get_mut(&education.id)
            .filter(|e| e.candidate_id == education.candidate_id)
            .ok_or_else(|| AppError::NotFound("Education not found".to_string()))?;
        *entry.value_mut() = education.clone();
        Ok(education.clone())
    }

    async fn delete_education(&self, id: &Uuid, candidate_id: &Uuid) -> Result<(), AppError> {
        self.0
            .educations
            .remove_if(id, |_, e| e.candidate_id == *candidate_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Education not found".to_string()))
    }
}

#[async_trait]
impl TemplateRepository for MemoryTemplateRepo {
    async fn list_templates(&self) -> Result<Vec<ResumeTemplate>, AppError> {
        let mut templates: Vec<ResumeTemplate> = self
            .0
            .templates
            .iter()
            .filter(|t| t.is_public)
            .map(|t| t.clone())
            .collect();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
        Ok(templates)
    }

    async fn fetch_template(&self, id: &Uuid) -> Result<Option<ResumeTemplate>, AppError> {
        Ok(self.0.templates.get(id).map(|t| t.clone()))
    }
}
