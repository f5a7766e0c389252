use actix_web::web;
use crate::handlers::resumes;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/resumes")
            .service(
                web::resource("")
                    .route(web::get().to(resumes::list_resumes))
                    .route(web::post().to(resumes::create_resume))
            )
            .service(
                web::resource("/from-profile")
                    .route(web::post().to(resumes::create_resume_from_profile))
            )
            .service(
                web::resource("/{resume_id}")
                    .route(web::get().to(resumes::get_resume))
                    .route(web::patch().to(resumes::update_resume))
                    .route(web::delete().to(resumes::delete_resume))
            )
            .service(
                web::resource("/{resume_id}/primary")
                    .route(web::post().to(resumes::set_primary_resume))
            )
    );
}
