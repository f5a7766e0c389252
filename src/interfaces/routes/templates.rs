use actix_web::web;
use crate::handlers::templates;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/templates")
            .service(
                web::resource("")
                    .route(web::get().to(templates::list_templates))
            )
            .service(
                web::resource("/{template_id}")
                    .route(web::get().to(templates::get_template))
            )
    );
}
