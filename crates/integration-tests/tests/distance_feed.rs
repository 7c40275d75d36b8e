//! Distance feed properties over the real service and SQLite repository

use tolka_core::application::booking::DistanceFeedRequest;
use tolka_core::error::AppError;
use tolka_core::port::BookingRepository;
use tolka_integration_tests::{booking_request, customer, setup_service, setup_stack};

fn feed(job_id: i64) -> DistanceFeedRequest {
    DistanceFeedRequest {
        job_id,
        distance: None,
        time: None,
        session_time: None,
        flagged: false,
        manually_handled: false,
        by_admin: false,
        admin_comments: None,
    }
}

#[tokio::test]
async fn flagged_without_comment_persists_nothing() {
    let (svc, repo) = setup_stack("feed_flagged_no_comment").await;
    let job = svc
        .create_job(booking_request(), &customer(10))
        .await
        .unwrap();

    let mut req = feed(job.id);
    req.flagged = true;
    req.distance = Some("10 km".to_string());

    let err = svc.distance_feed(req).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Please, add comment"),
        other => panic!("expected validation error, got {other}"),
    }

    // Nothing was written, not even the travel record
    let stored = svc.get_job(job.id).await.unwrap();
    assert!(!stored.flagged);
    assert!(stored.admin_comments.is_empty());
    assert!(repo.find_distance(job.id).await.unwrap().is_none());
}

#[tokio::test]
async fn flagged_with_comment_persists_distance_and_review() {
    let (svc, repo) = setup_stack("feed_flagged_with_comment").await;
    let job = svc
        .create_job(booking_request(), &customer(10))
        .await
        .unwrap();

    let mut req = feed(job.id);
    req.flagged = true;
    req.admin_comments = Some("double booking".to_string());
    req.distance = Some("10 km".to_string());
    req.time = Some("2 h".to_string());

    svc.distance_feed(req).await.unwrap();

    let stored = svc.get_job(job.id).await.unwrap();
    assert!(stored.flagged);
    assert_eq!(stored.admin_comments, "double booking");

    let record = repo.find_distance(job.id).await.unwrap().unwrap();
    assert_eq!(record.distance, "10 km");
    assert_eq!(record.time, "2 h");
}

#[tokio::test]
async fn review_fields_update_without_travel_data() {
    let svc = setup_service("feed_review_only").await;
    let job = svc
        .create_job(booking_request(), &customer(10))
        .await
        .unwrap();

    let mut req = feed(job.id);
    req.manually_handled = true;
    req.admin_comments = Some("ok".to_string());

    svc.distance_feed(req).await.unwrap();

    let stored = svc.get_job(job.id).await.unwrap();
    assert!(stored.manually_handled);
    assert!(!stored.flagged);
    assert!(!stored.by_admin);
    assert_eq!(stored.admin_comments, "ok");
}

#[tokio::test]
async fn session_time_from_the_feed_lands_on_the_job() {
    let svc = setup_service("feed_session_time").await;
    let job = svc
        .create_job(booking_request(), &customer(10))
        .await
        .unwrap();

    let mut req = feed(job.id);
    req.session_time = Some("01:15:00".to_string());

    svc.distance_feed(req).await.unwrap();

    let stored = svc.get_job(job.id).await.unwrap();
    assert_eq!(stored.session_time, "01:15:00");
}

#[tokio::test]
async fn review_update_for_unknown_job_is_not_found() {
    let svc = setup_service("feed_unknown_job").await;

    let mut req = feed(9_999);
    req.manually_handled = true;

    let err = svc.distance_feed(req).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
