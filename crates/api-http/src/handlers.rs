//! HTTP Handlers
//!
//! Each handler decodes its input, invokes one booking-service operation
//! and maps the outcome to a response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};
use tolka_core::domain::{AuthenticatedUser, Job, JobId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{
    CreateJobBody, DistanceFeedBody, HistoryQuery, JobIdBody, ListJobsQuery, ResendBody,
    UpdateJobBody,
};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.booking.list_jobs(&user, query.user_id).await?;
    Ok(Json(jobs))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = parse_job_id(&id)?;
    let job = state.booking.get_job(id).await?;
    Ok(Json(job))
}

pub async fn create_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateJobBody>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let job = state.booking.create_job(body.into_request(), &user).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateJobBody>,
) -> ApiResult<Json<Job>> {
    let id = parse_job_id(&id)?;
    let job = state
        .booking
        .update_job(id, body.into_update(), &user)
        .await?;
    Ok(Json(job))
}

pub async fn job_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.booking.job_history(&user, query.user_id).await?;
    Ok(Json(jobs))
}

pub async fn potential_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.booking.potential_jobs(&user).await?;
    Ok(Json(jobs))
}

pub async fn accept_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<JobIdBody>,
) -> ApiResult<Json<Job>> {
    let job = state
        .booking
        .accept_job(body.into_accept_request(), &user)
        .await?;
    Ok(Json(job))
}

pub async fn accept_job_with_id(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = parse_job_id(&id)?;
    let job = state.booking.accept_job_with_id(id, &user).await?;
    Ok(Json(job))
}

pub async fn cancel_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<JobIdBody>,
) -> ApiResult<Json<Value>> {
    state.booking.cancel_job(body.job_id, &user).await?;
    Ok(Json(json!({ "message": "Job cancelled" })))
}

pub async fn end_job(
    State(state): State<AppState>,
    Json(body): Json<JobIdBody>,
) -> ApiResult<Json<Value>> {
    state.booking.end_job(body.job_id).await?;
    Ok(Json(json!({ "message": "Session ended" })))
}

pub async fn customer_not_call(
    State(state): State<AppState>,
    Json(body): Json<JobIdBody>,
) -> ApiResult<Json<Value>> {
    state.booking.customer_not_call(body.job_id).await?;
    Ok(Json(json!({ "message": "Job marked as customer no-show" })))
}

pub async fn reopen_job(
    State(state): State<AppState>,
    Json(body): Json<JobIdBody>,
) -> ApiResult<Json<Value>> {
    state.booking.reopen(body.job_id).await?;
    Ok(Json(json!({ "message": "Job reopened" })))
}

pub async fn distance_feed(
    State(state): State<AppState>,
    Json(body): Json<DistanceFeedBody>,
) -> ApiResult<Json<Value>> {
    state.booking.distance_feed(body.into_request()).await?;
    Ok(Json(json!({ "message": "Record updated!" })))
}

pub async fn resend_notifications(
    State(state): State<AppState>,
    Json(body): Json<ResendBody>,
) -> ApiResult<Json<Value>> {
    state.booking.resend_notifications(body.jobid).await?;
    Ok(Json(json!({ "success": "Push sent" })))
}

pub async fn resend_sms_notifications(
    State(state): State<AppState>,
    Json(body): Json<ResendBody>,
) -> ApiResult<Json<Value>> {
    state.booking.resend_sms_notifications(body.jobid).await?;
    Ok(Json(json!({ "success": "SMS sent" })))
}

fn parse_job_id(raw: &str) -> Result<JobId, ApiError> {
    raw.parse::<JobId>().map_err(|_| ApiError::invalid_id())
}
