//! Route Table

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Build the service router.
///
/// Everything under `/api` except the health probe requires a caller
/// identity from the gateway headers.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/jobs", get(handlers::list_jobs).post(handlers::create_job))
        .route("/jobs/history", get(handlers::job_history))
        .route("/jobs/potential", get(handlers::potential_jobs))
        .route("/jobs/accept", post(handlers::accept_job))
        .route("/jobs/accept/:id", post(handlers::accept_job_with_id))
        .route("/jobs/cancel", post(handlers::cancel_job))
        .route("/jobs/end", post(handlers::end_job))
        .route("/jobs/customer-not-call", post(handlers::customer_not_call))
        .route("/jobs/reopen", post(handlers::reopen_job))
        .route("/jobs/distance-feed", post(handlers::distance_feed))
        .route(
            "/jobs/resend-notifications",
            post(handlers::resend_notifications),
        )
        .route(
            "/jobs/resend-sms-notifications",
            post(handlers::resend_sms_notifications),
        )
        .route("/jobs/:id", get(handlers::get_job).put(handlers::update_job))
        .layer(middleware::from_fn(auth::identity_layer))
        // Health stays reachable without an identity
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
