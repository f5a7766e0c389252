use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    entities::resume::{NewResume, UpdateResume},
    errors::AppError,
    use_cases::extractors::CandidateIdentity,
    AppState,
};

pub async fn list_resumes(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
) -> Result<HttpResponse, AppError> {
    let resumes = state.resume_handler.list_by_candidate(identity.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "resumes": resumes })))
}

pub async fn create_resume(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    payload: web::Json<NewResume>,
) -> Result<HttpResponse, AppError> {
    let resume = state
        .resume_handler
        .create(identity.0, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(resume))
}

pub async fn create_resume_from_profile(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
) -> Result<HttpResponse, AppError> {
    let resume = state.resume_handler.create_from_profile(identity.0).await?;
    Ok(HttpResponse::Created().json(resume))
}

pub async fn get_resume(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    resume_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let resume = state
        .resume_handler
        .get(resume_id.into_inner(), identity.0)
        .await?;
    Ok(HttpResponse::Ok().json(resume))
}

pub async fn update_resume(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    resume_id: web::Path<Uuid>,
    payload: web::Json<UpdateResume>,
) -> Result<HttpResponse, AppError> {
    let resume = state
        .resume_handler
        .update(resume_id.into_inner(), identity.0, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(resume))
}

pub async fn set_primary_resume(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    resume_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let resume = state
        .resume_handler
        .set_primary(resume_id.into_inner(), identity.0)
        .await?;
    Ok(HttpResponse::Ok().json(resume))
}

pub async fn delete_resume(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    resume_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state
        .resume_handler
        .delete(resume_id.into_inner(), identity.0)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
