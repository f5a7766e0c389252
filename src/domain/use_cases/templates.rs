use uuid::Uuid;

use crate::entities::template::ResumeTemplate;
use crate::errors::AppError;
use crate::interfaces::repositories::template::TemplateRepository;

/// Read-only template catalogue. A résumé copies a template's layout tag and
/// style payload at creation time instead of holding a live reference, so
/// there is nothing to mutate here.
pub struct TemplateHandler<T>
where
    T: TemplateRepository,
{
    pub template_repo: T,
}

impl<T> TemplateHandler<T>
where
    T: TemplateRepository,
{
    pub fn new(template_repo: T) -> Self {
        TemplateHandler { template_repo }
    }

    pub async fn list(&self) -> Result<Vec<ResumeTemplate>, AppError> {
        self.template_repo.list_templates().await
    }

    pub async fn get(&self, id: Uuid) -> Result<ResumeTemplate, AppError> {
        self.template_repo
            .fetch_template(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
    }
}
