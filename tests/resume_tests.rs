
use std::time::Duration;

use serde_json::json;
use test_utils::*;
use uuid::Uuid;

use jobboard_backend::entities::resume::{NewResume, ResumeLayout, UpdateResume};
use jobboard_backend::errors::AppError;

fn new_resume(title: &str) -> NewResume {
    NewResume {
        title: title.to_string(),
        content: sample_content(),
        layout: None,
        style: None,
    }
}

#[actix_rt::test]
async fn create_returns_a_non_primary_private_resume() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");

    let resume = app
        .resume_handler
        .create(candidate_id, new_resume("My CV"))
        .await
        .unwrap();

    assert_eq!(resume.candidate_id, candidate_id);
    assert_eq!(resume.title, "My CV");
    assert_eq!(resume.layout, ResumeLayout::Modern);
    assert!(!resume.is_primary);
    assert!(!resume.is_public);
    assert!(resume.style.is_none());
    assert_eq!(resume.created_at, resume.updated_at);
}

#[actix_rt::test]
async fn create_for_unknown_candidate_is_not_found() {
    let app = TestApp::new();

    let err = app
        .resume_handler
        .create(Uuid::new_v4(), new_resume("My CV"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn create_with_missing_email_reports_the_field() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");

    let mut request = new_resume("My CV");
    request.content.personal.email = String::new();

    let err = app
        .resume_handler
        .create(candidate_id, request)
        .await
        .unwrap_err();

    match err {
        AppError::ValidationError(details) => {
            assert_eq!(details.len(), 1);
            assert_eq!(details[0].field, "personal.email");
        }
        other => panic!("expected ValidationError, got {other:?}"),
    }
}

#[actix_rt::test]
async fn update_changes_only_supplied_fields() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");
    let resume = app
        .resume_handler
        .create(candidate_id, new_resume("Draft"))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2)).await;
    let updated = app
        .resume_handler
        .update(
            resume.id,
            candidate_id,
            UpdateResume {
                title: Some("Final".to_string()),
                is_public: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert!(updated.is_public);
    assert_eq!(updated.layout, resume.layout);
    assert_eq!(updated.content.0, resume.content.0);
    assert!(updated.updated_at > resume.updated_at);
    assert_eq!(updated.created_at, resume.created_at);
}

#[actix_rt::test]
async fn update_cannot_touch_another_candidates_resume() {
    let app = TestApp::new();
    let owner_id = app.seed_candidate(Some("Owner"), "owner@example.com");
    let intruder_id = app.seed_candidate(Some("Intruder"), "intruder@example.com");
    let resume = app
        .resume_handler
        .create(owner_id, new_resume("Mine"))
        .await
        .unwrap();

    let err = app
        .resume_handler
        .update(
            resume.id,
            intruder_id,
            UpdateResume {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenAccess));

    // The owner's document is untouched.
    let unchanged = app.resume_handler.get(resume.id, owner_id).await.unwrap();
    assert_eq!(unchanged.title, "Mine");
    assert_eq!(unchanged.updated_at, resume.updated_at);
}

#[actix_rt::test]
async fn style_patch_distinguishes_absent_null_and_value() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");
    let resume = app
        .resume_handler
        .create(
            candidate_id,
            NewResume {
                title: "Styled".to_string(),
                content: sample_content(),
                layout: Some(ResumeLayout::Classic),
                style: Some(sample_style()),
            },
        )
        .await
        .unwrap();
    assert!(resume.style.is_some());

    // An empty body is a valid no-op patch.
    let patch: UpdateResume = serde_json::from_value(json!({})).unwrap();
    assert!(patch.is_empty());

    // Absent key leaves the snapshot in place.
    let patch: UpdateResume = serde_json::from_value(json!({ "title": "Renamed" })).unwrap();
    assert!(!patch.is_empty());
    let updated = app
        .resume_handler
        .update(resume.id, candidate_id, patch)
        .await
        .unwrap();
    assert!(updated.style.is_some());

    // Explicit null clears it.
    let patch: UpdateResume = serde_json::from_value(json!({ "style": null })).unwrap();
    assert!(patch.style.is_set_to_null());
    let updated = app
        .resume_handler
        .update(resume.id, candidate_id, patch)
        .await
        .unwrap();
    assert!(updated.style.is_none());

    // A value replaces it.
    let patch: UpdateResume =
        serde_json::from_value(json!({ "style": serde_json::to_value(sample_style()).unwrap() }))
            .unwrap();
    let updated = app
        .resume_handler
        .update(resume.id, candidate_id, patch)
        .await
        .unwrap();
    assert_eq!(updated.style.map(|s| s.0), Some(sample_style()));
}

#[actix_rt::test]
async fn set_primary_demotes_the_previous_primary() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");
    let r1 = app
        .resume_handler
        .create(candidate_id, new_resume("First"))
        .await
        .unwrap();
    let r2 = app
        .resume_handler
        .create(candidate_id, new_resume("Second"))
        .await
        .unwrap();

    let promoted = app
        .resume_handler
        .set_primary(r1.id, candidate_id)
        .await
        .unwrap();
    assert!(promoted.is_primary);
    let r1_promoted_at = promoted.updated_at;

    tokio::time::sleep(Duration::from_millis(2)).await;
    let promoted = app
        .resume_handler
        .set_primary(r2.id, candidate_id)
        .await
        .unwrap();
    assert!(promoted.is_primary);

    let demoted = app.resume_handler.get(r1.id, candidate_id).await.unwrap();
    assert!(!demoted.is_primary);
    // The demotion counts as a mutation of the old primary.
    assert!(demoted.updated_at > r1_promoted_at);

    assert_eq!(app.store.primary_count(&candidate_id), 1);
}

#[actix_rt::test]
async fn set_primary_for_foreign_resume_is_not_found() {
    let app = TestApp::new();
    let owner_id = app.seed_candidate(Some("Owner"), "owner@example.com");
    let intruder_id = app.seed_candidate(Some("Intruder"), "intruder@example.com");
    let resume = app
        .resume_handler
        .create(owner_id, new_resume("Mine"))
        .await
        .unwrap();

    let err = app
        .resume_handler
        .set_primary(resume.id, intruder_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = app
        .resume_handler
        .set_primary(Uuid::new_v4(), owner_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn primary_count_never_exceeds_one_across_mixed_operations() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");

    let mut ids = Vec::new();
    for i in 0..4 {
        let resume = app
            .resume_handler
            .create(candidate_id, new_resume(&format!("CV {i}")))
            .await
            .unwrap();
        ids.push(resume.id);
    }
    assert_eq!(app.store.primary_count(&candidate_id), 0);

    for id in &ids {
        app.resume_handler
            .set_primary(*id, candidate_id)
            .await
            .unwrap();
        assert_eq!(app.store.primary_count(&candidate_id), 1);
    }

    // Creating more documents never disturbs the standing primary.
    app.resume_handler
        .create(candidate_id, new_resume("Another"))
        .await
        .unwrap();
    assert_eq!(app.store.primary_count(&candidate_id), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_promotions_leave_exactly_one_visible_primary() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");
    let r1 = app
        .resume_handler
        .create(candidate_id, new_resume("First"))
        .await
        .unwrap();
    let r2 = app
        .resume_handler
        .create(candidate_id, new_resume("Second"))
        .await
        .unwrap();

    for _ in 0..50 {
        let h1 = app.resume_handler.clone();
        let h2 = app.resume_handler.clone();
        let (id1, id2) = (r1.id, r2.id);

        let t1 = tokio::spawn(async move { h1.set_primary(id1, candidate_id).await });
        let t2 = tokio::spawn(async move { h2.set_primary(id2, candidate_id).await });

        t1.await.unwrap().unwrap();
        t2.await.unwrap().unwrap();

        assert_eq!(app.store.primary_count(&candidate_id), 1);
    }
}

#[actix_rt::test]
async fn list_returns_newest_updated_first() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");

    let r1 = app
        .resume_handler
        .create(candidate_id, new_resume("First"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    let r2 = app
        .resume_handler
        .create(candidate_id, new_resume("Second"))
        .await
        .unwrap();

    let listed = app
        .resume_handler
        .list_by_candidate(candidate_id)
        .await
        .unwrap();
    assert_eq!(
        listed.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![r2.id, r1.id]
    );

    // Editing the older document moves it to the front.
    tokio::time::sleep(Duration::from_millis(2)).await;
    app.resume_handler
        .update(
            r1.id,
            candidate_id,
            UpdateResume {
                title: Some("First, revised".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = app
        .resume_handler
        .list_by_candidate(candidate_id)
        .await
        .unwrap();
    assert_eq!(
        listed.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![r1.id, r2.id]
    );
}

#[actix_rt::test]
async fn deleting_the_primary_selects_no_replacement() {
    let app = TestApp::new();
    let candidate_id = app.seed_candidate(Some("Alice Dupont"), "alice@example.com");
    let r1 = app
        .resume_handler
        .create(candidate_id, new_resume("First"))
        .await
        .unwrap();
    app.resume_handler
        .create(candidate_id, new_resume("Second"))
        .await
        .unwrap();
    app.resume_handler
        .set_primary(r1.id, candidate_id)
        .await
        .unwrap();

    app.resume_handler.delete(r1.id, candidate_id).await.unwrap();

    assert_eq!(app.store.primary_count(&candidate_id), 0);
    let listed = app
        .resume_handler
        .list_by_candidate(candidate_id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[actix_rt::test]
async fn templates_are_listed_and_fetched() {
    let app = TestApp::new();

    let templates = app.template_handler.list().await.unwrap();
    assert_eq!(templates.len(), 4);

    let first = app.template_handler.get(templates[0].id).await.unwrap();
    assert_eq!(first.id, templates[0].id);

    let err = app.template_handler.get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
