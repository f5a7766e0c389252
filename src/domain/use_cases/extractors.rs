use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

/// Extractor for the authenticated candidate identity. The upstream auth
/// layer resolves the session and forwards the candidate id in the
/// `x-user-id` header; this service trusts it completely.
/// Returns 401 when the header is missing or malformed.
/// Usage: add `identity: CandidateIdentity` as a handler parameter.
#[derive(Debug, Clone, Copy)]
pub struct CandidateIdentity(pub Uuid);

impl FromRequest for CandidateIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let candidate_id = req
            .headers()
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        match candidate_id {
            Some(id) => ready(Ok(CandidateIdentity(id))),
            None => ready(Err(AppError::UnauthorizedAccess.into())),
        }
    }
}
