// Notification Payload - what a translator sees when a job is announced

use serde::{Deserialize, Serialize};

use super::job::{Job, JobId};

/// Payload derived from a job for push/SMS dispatch.
///
/// Deliberately a projection: it carries what a translator needs to decide,
/// not the whole job row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobNotification {
    pub job_id: JobId,
    pub from_language: String,
    pub to_language: String,
    pub due_at: i64,
    pub duration_minutes: i64,
    pub immediate: bool,
}

impl JobNotification {
    pub fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id,
            from_language: job.from_language.clone(),
            to_language: job.to_language.clone(),
            due_at: job.due_at,
            duration_minutes: job.duration_minutes,
            immediate: job.immediate,
        }
    }
}
