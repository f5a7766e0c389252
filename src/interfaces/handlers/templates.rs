use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{errors::AppError, AppState};

pub async fn list_templates(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let templates = state.template_handler.list().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "templates": templates })))
}

pub async fn get_template(
    state: web::Data<AppState>,
    template_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let template = state.template_handler.get(template_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(template))
}
