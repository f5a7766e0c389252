
use test_utils::*;
use uuid::Uuid;

use jobboard_backend::entities::resume::NewResume;
use jobboard_backend::errors::AppError;
use jobboard_backend::repositories::candidate::MockCandidateRepository;
use jobboard_backend::repositories::resume::MockResumeRepository;
use jobboard_backend::use_cases::resumes::ResumeHandler;

fn valid_request() -> NewResume {
    NewResume {
        title: "My CV".to_string(),
        content: sample_content(),
        layout: None,
        style: None,
    }
}

#[actix_rt::test]
async fn create_never_writes_for_an_unknown_candidate() {
    let mut candidate_repo = MockCandidateRepository::new();
    candidate_repo
        .expect_candidate_exists()
        .times(1)
        .returning(|_| Ok(false));
    // No expectations: any write on the resume repository fails the test.
    let resume_repo = MockResumeRepository::new();

    let handler = ResumeHandler::new(resume_repo, candidate_repo);
    let err = handler
        .create(Uuid::new_v4(), valid_request())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn create_short_circuits_on_invalid_content() {
    let candidate_repo = MockCandidateRepository::new();
    let resume_repo = MockResumeRepository::new();

    let mut request = valid_request();
    request.content.personal.full_name = String::new();

    let handler = ResumeHandler::new(resume_repo, candidate_repo);
    let err = handler.create(Uuid::new_v4(), request).await.unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
}

#[actix_rt::test]
async fn create_short_circuits_on_blank_title() {
    let candidate_repo = MockCandidateRepository::new();
    let resume_repo = MockResumeRepository::new();

    let mut request = valid_request();
    request.title = String::new();

    let handler = ResumeHandler::new(resume_repo, candidate_repo);
    let err = handler.create(Uuid::new_v4(), request).await.unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
}

#[actix_rt::test]
async fn update_stops_at_the_ownership_check() {
    let candidate_repo = MockCandidateRepository::new();
    let mut resume_repo = MockResumeRepository::new();
    let owner = Uuid::new_v4();
    resume_repo
        .expect_resume_owner()
        .times(1)
        .returning(move |_| Ok(Some(owner)));
    // update_resume is never expected; reaching it would panic.

    let handler = ResumeHandler::new(resume_repo, candidate_repo);
    let err = handler
        .update(Uuid::new_v4(), Uuid::new_v4(), Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ForbiddenAccess));
}

#[actix_rt::test]
async fn from_profile_propagates_missing_candidate() {
    let mut candidate_repo = MockCandidateRepository::new();
    candidate_repo
        .expect_fetch_profile()
        .times(1)
        .returning(|_| Ok(None));
    let resume_repo = MockResumeRepository::new();

    let handler = ResumeHandler::new(resume_repo, candidate_repo);
    let err = handler
        .create_from_profile(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}
