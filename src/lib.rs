mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::db;

use repositories::sqlx_repo::{SqlxCandidateRepo, SqlxResumeRepo, SqlxTemplateRepo};
use use_cases::profiles::ProfileHandler;
use use_cases::resumes::ResumeHandler;
use use_cases::templates::TemplateHandler;

pub type AppResumeHandler = ResumeHandler<SqlxResumeRepo, SqlxCandidateRepo>;
pub type AppProfileHandler = ProfileHandler<SqlxCandidateRepo>;
pub type AppTemplateHandler = TemplateHandler<SqlxTemplateRepo>;

pub struct AppState {
    pub resume_handler: AppResumeHandler,
    pub profile_handler: AppProfileHandler,
    pub template_handler: AppTemplateHandler,
}

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let resume_handler = ResumeHandler::new(
            SqlxResumeRepo::new(pool.clone()),
            SqlxCandidateRepo::new(pool.clone()),
        );
        let profile_handler = ProfileHandler::new(SqlxCandidateRepo::new(pool.clone()));
        let template_handler = TemplateHandler::new(SqlxTemplateRepo::new(pool));

        AppState {
            resume_handler,
            profile_handler,
            template_handler,
        }
    }
}
