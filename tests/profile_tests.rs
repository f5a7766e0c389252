
use serde_json::json;
use test_utils::*;
use uuid::Uuid;

use jobboard_backend::entities::candidate::UpdateProfile;
use jobboard_backend::entities::experience::{NewExperience, UpdateExperience};
use jobboard_backend::errors::AppError;

#[actix_rt::test]
async fn from_profile_copies_experiences_in_chronological_order() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();
    app.seed_experience(candidate_id, "Designer", "2019-03-01", Some("2021-12-31"), false);
    app.seed_experience(candidate_id, "Lead Designer", "2022-01-01", None, true);

    let resume = app
        .resume_handler
        .create_from_profile(candidate_id)
        .await
        .unwrap();
    let content = &resume.content.0;

    assert_eq!(content.experiences.len(), 2);
    assert_eq!(content.experiences[0].position, "Designer");
    assert_eq!(content.experiences[0].start_date, "2019-03-01");
    assert_eq!(content.experiences[0].end_date, "2021-12-31");
    assert!(!content.experiences[0].current);

    // The ongoing position emits an empty end date and the current flag.
    assert_eq!(content.experiences[1].position, "Lead Designer");
    assert_eq!(content.experiences[1].end_date, "");
    assert!(content.experiences[1].current);

    assert!(content.education.is_empty());
}

#[actix_rt::test]
async fn from_profile_fills_the_personal_block() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();

    let resume = app
        .resume_handler
        .create_from_profile(candidate_id)
        .await
        .unwrap();
    let personal = &resume.content.0.personal;

    assert_eq!(resume.title, "Alice Dupont - CV");
    assert_eq!(personal.full_name, "Alice Dupont");
    assert_eq!(personal.title, "Product Designer");
    assert_eq!(personal.email, "alice@example.com");
    assert_eq!(personal.phone, "+237 650 000 000");
    // Empty location parts are skipped when joining.
    assert_eq!(personal.location, "Douala, Cameroon");
    assert_eq!(personal.summary, "Designer with a backend past.");
    assert_eq!(personal.links.len(), 2);
}

#[actix_rt::test]
async fn from_profile_maps_skill_tags_with_neutral_level() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();

    let resume = app
        .resume_handler
        .create_from_profile(candidate_id)
        .await
        .unwrap();
    let content = &resume.content.0;

    assert_eq!(content.skills.len(), 2);
    for skill in &content.skills {
        assert_eq!(skill.category, "Technical");
        assert_eq!(skill.level, 3);
        assert!(!skill.id.is_empty());
    }

    // Enrichment sections are resume-specific and start empty.
    assert!(content.projects.is_empty());
    assert!(content.languages.is_empty());
    assert!(content.certifications.is_empty());

    assert!(!resume.is_primary);
}

#[actix_rt::test]
async fn from_profile_twice_creates_independent_documents() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();
    app.seed_experience(candidate_id, "Designer", "2019-03-01", None, true);

    let first = app
        .resume_handler
        .create_from_profile(candidate_id)
        .await
        .unwrap();
    let second = app
        .resume_handler
        .create_from_profile(candidate_id)
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    // Copies, not references: item ids are freshly generated per document.
    assert_ne!(
        first.content.0.experiences[0].id,
        second.content.0.experiences[0].id
    );

    let listed = app
        .resume_handler
        .list_by_candidate(candidate_id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
}

#[actix_rt::test]
async fn from_profile_for_unknown_candidate_is_not_found() {
    let app = TestApp::new();

    let err = app
        .resume_handler
        .create_from_profile(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn source_edits_do_not_propagate_into_existing_documents() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();
    let experience_id =
        app.seed_experience(candidate_id, "Designer", "2019-03-01", None, true);

    let resume = app
        .resume_handler
        .create_from_profile(candidate_id)
        .await
        .unwrap();

    app.profile_handler
        .update_experience(
            experience_id,
            candidate_id,
            UpdateExperience {
                title: Some("Principal Designer".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let unchanged = app.resume_handler.get(resume.id, candidate_id).await.unwrap();
    assert_eq!(unchanged.content.0.experiences[0].position, "Designer");
}

#[actix_rt::test]
async fn profile_patch_updates_only_supplied_fields() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();

    let empty: UpdateProfile = serde_json::from_value(json!({})).unwrap();
    assert!(empty.is_empty());

    let patch: UpdateProfile = serde_json::from_value(json!({
        "headline": "Staff Designer",
        "locationState": "Littoral",
        "bio": null
    }))
    .unwrap();
    assert!(!patch.is_empty());

    let candidate = app
        .profile_handler
        .update_profile(candidate_id, patch)
        .await
        .unwrap();

    assert_eq!(candidate.headline.as_deref(), Some("Staff Designer"));
    assert_eq!(candidate.location_state.as_deref(), Some("Littoral"));
    assert_eq!(candidate.bio, None);
    // Untouched fields survive the patch.
    assert_eq!(candidate.phone.as_deref(), Some("+237 650 000 000"));
    assert_eq!(candidate.location_city.as_deref(), Some("Douala"));
}

#[actix_rt::test]
async fn profile_patch_rejects_bad_phone_and_links() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();

    let patch: UpdateProfile =
        serde_json::from_value(json!({ "phone": "call me maybe" })).unwrap();
    let err = app
        .profile_handler
        .update_profile(candidate_id, patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let patch: UpdateProfile =
        serde_json::from_value(json!({ "links": { "github": "not a url" } })).unwrap();
    let err = app
        .profile_handler
        .update_profile(candidate_id, patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[actix_rt::test]
async fn adding_an_ongoing_experience_clears_its_end_date() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();

    let experience = app
        .profile_handler
        .add_experience(
            candidate_id,
            NewExperience {
                title: "Designer".to_string(),
                company: Some("Acme".to_string()),
                start_date: date("2023-02-01"),
                end_date: Some(date("2024-01-01")),
                currently: true,
                description: None,
            },
        )
        .await
        .unwrap();

    assert!(experience.currently);
    assert_eq!(experience.end_date, None);
}

#[actix_rt::test]
async fn experience_update_validates_the_resulting_date_range() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();
    let experience_id =
        app.seed_experience(candidate_id, "Designer", "2021-06-01", Some("2022-06-01"), false);

    // Moving the start past the existing end must fail even though the patch
    // itself carries no end date.
    let err = app
        .profile_handler
        .update_experience(
            experience_id,
            candidate_id,
            UpdateExperience {
                start_date: Some(date("2023-01-01")),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
}

#[actix_rt::test]
async fn experience_ownership_is_isolated_between_candidates() {
    let app = TestApp::new();
    let owner_id = app.seed_candidate(Some("Owner"), "owner@example.com");
    let intruder_id = app.seed_candidate(Some("Intruder"), "intruder@example.com");
    let experience_id =
        app.seed_experience(owner_id, "Designer", "2021-06-01", None, true);

    let err = app
        .profile_handler
        .update_experience(
            experience_id,
            intruder_id,
            UpdateExperience {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenAccess));

    let err = app
        .profile_handler
        .delete_experience(experience_id, intruder_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenAccess));

    let experiences = app.profile_handler.list_experiences(owner_id).await.unwrap();
    assert_eq!(experiences.len(), 1);
    assert_eq!(experiences[0].title, "Designer");
}

#[actix_rt::test]
async fn educations_support_the_full_crud_cycle() {
    let app = TestApp::new();
    let candidate_id = app.seed_full_candidate();
    let education_id = app.seed_education(candidate_id, "University of Douala");

    let educations = app.profile_handler.list_educations(candidate_id).await.unwrap();
    assert_eq!(educations.len(), 1);

    let patch: jobboard_backend::entities::education::UpdateEducation =
        serde_json::from_value(json!({ "degree": "MSc", "field": null })).unwrap();
    let updated = app
        .profile_handler
        .update_education(education_id, candidate_id, patch)
        .await
        .unwrap();
    assert_eq!(updated.degree.as_deref(), Some("MSc"));
    assert_eq!(updated.field, None);
    assert_eq!(updated.school, "University of Douala");

    app.profile_handler
        .delete_education(education_id, candidate_id)
        .await
        .unwrap();
    let educations = app.profile_handler.list_educations(candidate_id).await.unwrap();
    assert!(educations.is_empty());
}
