use actix_web::web;
use crate::handlers::profile;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(
                web::resource("")
                    .route(web::get().to(profile::get_profile))
                    .route(web::patch().to(profile::update_profile))
            )
            .service(
                web::resource("/experiences")
                    .route(web::get().to(profile::list_experiences))
                    .route(web::post().to(profile::add_experience))
            )
            .service(
                web::resource("/experiences/{experience_id}")
                    .route(web::put().to(profile::update_experience))
                    .route(web::delete().to(profile::delete_experience))
            )
            .service(
                web::resource("/educations")
                    .route(web::get().to(profile::list_educations))
                    .route(web::post().to(profile::add_education))
            )
            .service(
                web::resource("/educations/{education_id}")
                    .route(web::put().to(profile::update_education))
                    .route(web::delete().to(profile::delete_education))
            )
    );
}
