use actix_web::web;

use crate::handlers::home::home;

mod json_error;
mod profile;
mod resumes;
mod system;
mod templates;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(system::config_routes)
            .configure(resumes::config_routes)
            .configure(templates::config_routes)
            .configure(profile::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
