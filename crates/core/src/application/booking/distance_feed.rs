// Distance Feed Use Case

use crate::domain::{AdminReview, JobId};
use crate::error::{AppError, Result};
use crate::port::{BookingRepository, TimeProvider};
use serde::{Deserialize, Serialize};

/// Admin feed of travel data and review flags for one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceFeedRequest {
    pub job_id: JobId,

    #[serde(default)]
    pub distance: Option<String>,

    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub session_time: Option<String>,

    pub flagged: bool,
    pub manually_handled: bool,
    pub by_admin: bool,

    #[serde(default)]
    pub admin_comments: Option<String>,
}

/// Execute the distance feed.
///
/// Invariant checked before any mutation: a flagged job must carry a
/// comment. The Distance record is touched only when travel data is
/// present; the job's review fields only when something non-default was
/// sent.
pub async fn execute(
    repo: &dyn BookingRepository,
    time: &dyn TimeProvider,
    req: DistanceFeedRequest,
) -> Result<()> {
    let admin_comments = req.admin_comments.unwrap_or_default();
    let session_time = req.session_time.unwrap_or_default();
    let distance = req.distance.unwrap_or_default();
    let travel_time = req.time.unwrap_or_default();

    if req.flagged && admin_comments.is_empty() {
        return Err(AppError::Validation("Please, add comment".to_string()));
    }

    if !distance.is_empty() || !travel_time.is_empty() {
        repo.upsert_distance(req.job_id, &distance, &travel_time)
            .await?;
    }

    let review = AdminReview {
        admin_comments,
        session_time,
        flagged: req.flagged,
        manually_handled: req.manually_handled,
        by_admin: req.by_admin,
    };

    if !review.is_noop() {
        repo.update_admin_review(req.job_id, &review, time.now_millis())
            .await?;
    }

    Ok(())
}
