use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    entities::{
        candidate::UpdateProfile,
        education::{NewEducation, UpdateEducation},
        experience::{NewExperience, UpdateExperience},
    },
    errors::AppError,
    use_cases::extractors::CandidateIdentity,
    AppState,
};

pub async fn get_profile(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
) -> Result<HttpResponse, AppError> {
    let profile = state.profile_handler.get_profile(identity.0).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn update_profile(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    payload: web::Json<UpdateProfile>,
) -> Result<HttpResponse, AppError> {
    let candidate = state
        .profile_handler
        .update_profile(identity.0, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(candidate))
}

// ----- experiences -----

pub async fn list_experiences(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
) -> Result<HttpResponse, AppError> {
    let experiences = state.profile_handler.list_experiences(identity.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "experiences": experiences })))
}

pub async fn add_experience(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    payload: web::Json<NewExperience>,
) -> Result<HttpResponse, AppError> {
    let experience = state
        .profile_handler
        .add_experience(identity.0, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(experience))
}

pub async fn update_experience(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    experience_id: web::Path<Uuid>,
    payload: web::Json<UpdateExperience>,
) -> Result<HttpResponse, AppError> {
    let experience = state
        .profile_handler
        .update_experience(experience_id.into_inner(), identity.0, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(experience))
}

pub async fn delete_experience(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    experience_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state
        .profile_handler
        .delete_experience(experience_id.into_inner(), identity.0)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

// ----- educations -----

pub async fn list_educations(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
) -> Result<HttpResponse, AppError> {
    let educations = state.profile_handler.list_educations(identity.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "educations": educations })))
}

pub async fn add_education(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    payload: web::Json<NewEducation>,
) -> Result<HttpResponse, AppError> {
    let education = state
        .profile_handler
        .add_education(identity.0, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(education))
}

pub async fn update_education(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    education_id: web::Path<Uuid>,
    payload: web::Json<UpdateEducation>,
) -> Result<HttpResponse, AppError> {
    let education = state
        .profile_handler
        .update_education(education_id.into_inner(), identity.0, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(education))
}

pub async fn delete_education(
    state: web::Data<AppState>,
    identity: CandidateIdentity,
    education_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state
        .profile_handler
        .delete_education(education_id.into_inner(), identity.0)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
