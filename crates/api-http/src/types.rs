//! Wire Types
//!
//! Request bodies as clients send them. Field names follow the existing
//! wire contract (`jobid`, `admincomment`), mapped here into the typed
//! application requests; unknown transport fields are dropped on decode.

use serde::Deserialize;
use tolka_core::application::booking::{AcceptJobRequest, CreateJobRequest, DistanceFeedRequest};
use tolka_core::domain::JobUpdate;

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobBody {
    pub from_language: String,
    pub to_language: String,
    pub due_at: i64,
    pub duration_minutes: i64,

    #[serde(default)]
    pub immediate: bool,

    #[serde(default)]
    pub remarks: Option<String>,

    #[serde(default)]
    pub customer_id: Option<i64>,
}

impl CreateJobBody {
    pub fn into_request(self) -> CreateJobRequest {
        CreateJobRequest {
            from_language: self.from_language,
            to_language: self.to_language,
            due_at: self.due_at,
            duration_minutes: self.duration_minutes,
            immediate: self.immediate,
            remarks: self.remarks,
            customer_id: self.customer_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateJobBody {
    #[serde(default)]
    pub from_language: Option<String>,

    #[serde(default)]
    pub to_language: Option<String>,

    #[serde(default)]
    pub due_at: Option<i64>,

    #[serde(default)]
    pub duration_minutes: Option<i64>,

    #[serde(default)]
    pub remarks: Option<String>,
}

impl UpdateJobBody {
    pub fn into_update(self) -> JobUpdate {
        JobUpdate {
            from_language: self.from_language,
            to_language: self.to_language,
            due_at: self.due_at,
            duration_minutes: self.duration_minutes,
            remarks: self.remarks,
        }
    }
}

/// Payload-style job reference (`accept`, `cancel`, `end`, ...)
#[derive(Debug, Deserialize)]
pub struct JobIdBody {
    pub job_id: i64,
}

impl JobIdBody {
    pub fn into_accept_request(self) -> AcceptJobRequest {
        AcceptJobRequest {
            job_id: self.job_id,
        }
    }
}

/// Resend endpoints keep the legacy `jobid` key
#[derive(Debug, Deserialize)]
pub struct ResendBody {
    pub jobid: i64,
}

#[derive(Debug, Deserialize)]
pub struct DistanceFeedBody {
    #[serde(default)]
    pub distance: Option<String>,

    #[serde(default)]
    pub time: Option<String>,

    pub jobid: i64,

    #[serde(default)]
    pub session_time: Option<String>,

    pub flagged: bool,
    pub manually_handled: bool,
    pub by_admin: bool,

    #[serde(default)]
    pub admincomment: Option<String>,
}

impl DistanceFeedBody {
    pub fn into_request(self) -> DistanceFeedRequest {
        DistanceFeedRequest {
            job_id: self.jobid,
            distance: self.distance,
            time: self.time,
            session_time: self.session_time,
            flagged: self.flagged,
            manually_handled: self.manually_handled,
            by_admin: self.by_admin,
            admin_comments: self.admincomment,
        }
    }
}
