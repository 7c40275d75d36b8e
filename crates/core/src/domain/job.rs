// Job Domain Model

use serde::{Deserialize, Serialize};

/// Job ID (repository-assigned, numeric)
pub type JobId = i64;

/// Booking lifecycle states
///
/// TIMEDOUT is never set through this surface; it is a stored state an
/// external deadline sweep may leave behind, and reopen consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Assigned,
    Completed,
    Cancelled,
    Timedout,
    NotCarriedOutCustomer,
}

impl JobStatus {
    /// Terminal states that show up in a user's booking history
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed
                | JobStatus::Cancelled
                | JobStatus::Timedout
                | JobStatus::NotCarriedOutCustomer
        )
    }

    /// States a reopen request can recover from
    pub fn can_reopen(&self) -> bool {
        matches!(self, JobStatus::Cancelled | JobStatus::Timedout)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "PENDING"),
            JobStatus::Assigned => write!(f, "ASSIGNED"),
            JobStatus::Completed => write!(f, "COMPLETED"),
            JobStatus::Cancelled => write!(f, "CANCELLED"),
            JobStatus::Timedout => write!(f, "TIMEDOUT"),
            JobStatus::NotCarriedOutCustomer => write!(f, "NOT_CARRIED_OUT_CUSTOMER"),
        }
    }
}

/// Job Entity
///
/// A single translation-session booking: who booked it, which translator
/// holds it, the language pair and schedule, plus the admin-review fields
/// fed by the distance feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub customer_id: i64,
    pub translator_id: Option<i64>,
    pub status: JobStatus,

    pub from_language: String,
    pub to_language: String,
    pub due_at: i64, // epoch ms
    pub duration_minutes: i64,
    pub immediate: bool,
    pub remarks: Option<String>,

    // Admin review
    pub session_time: String,
    pub admin_comments: String,
    pub flagged: bool,
    pub manually_handled: bool,
    pub by_admin: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

impl Job {
    /// Transition to ASSIGNED, recording the accepting translator
    pub fn accept(&mut self, translator_id: i64, now_millis: i64) -> super::error::Result<()> {
        if self.status != JobStatus::Pending || self.translator_id.is_some() {
            return Err(super::error::DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: JobStatus::Assigned.to_string(),
            });
        }
        self.status = JobStatus::Assigned;
        self.translator_id = Some(translator_id);
        self.updated_at = now_millis;
        Ok(())
    }

    /// Transition to CANCELLED
    pub fn cancel(&mut self, now_millis: i64) -> super::error::Result<()> {
        if !matches!(self.status, JobStatus::Pending | JobStatus::Assigned) {
            return Err(super::error::DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: JobStatus::Cancelled.to_string(),
            });
        }
        self.status = JobStatus::Cancelled;
        self.updated_at = now_millis;
        Ok(())
    }

    /// Transition to COMPLETED, recording the session time
    pub fn complete(&mut self, session_time: String, now_millis: i64) -> super::error::Result<()> {
        if self.status != JobStatus::Assigned {
            return Err(super::error::DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: JobStatus::Completed.to_string(),
            });
        }
        self.status = JobStatus::Completed;
        self.session_time = session_time;
        self.updated_at = now_millis;
        Ok(())
    }

    /// Transition back to PENDING, releasing the translator
    pub fn reopen(&mut self, now_millis: i64) -> super::error::Result<()> {
        if !self.status.can_reopen() {
            return Err(super::error::DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: JobStatus::Pending.to_string(),
            });
        }
        self.status = JobStatus::Pending;
        self.translator_id = None;
        self.updated_at = now_millis;
        Ok(())
    }
}

/// Fields of a job about to be inserted (the repository assigns the id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub customer_id: i64,
    pub from_language: String,
    pub to_language: String,
    pub due_at: i64,
    pub duration_minutes: i64,
    pub immediate: bool,
    pub remarks: Option<String>,
    pub created_at: i64,
}

/// Partial update of a job's booking fields; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobUpdate {
    pub from_language: Option<String>,
    pub to_language: Option<String>,
    pub due_at: Option<i64>,
    pub duration_minutes: Option<i64>,
    pub remarks: Option<String>,
}

/// Admin-review fields written by the distance feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminReview {
    pub admin_comments: String,
    pub session_time: String,
    pub flagged: bool,
    pub manually_handled: bool,
    pub by_admin: bool,
}

impl AdminReview {
    /// True when nothing admin-relevant is set and the job row can be left alone
    pub fn is_noop(&self) -> bool {
        self.admin_comments.is_empty()
            && self.session_time.is_empty()
            && !self.flagged
            && !self.manually_handled
            && !self.by_admin
    }
}

/// Format the span between two timestamps as `HH:MM:SS`.
///
/// A session that ends before it was due yields `00:00:00` rather than a
/// negative duration.
pub fn format_session_time(start_millis: i64, end_millis: i64) -> String {
    let total_secs = ((end_millis - start_millis).max(0)) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
