// Booking Repository Port (Interface)

use crate::domain::{AdminReview, Distance, Job, JobId, JobStatus, JobUpdate, NewJob, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for booking persistence.
///
/// State transitions are single-row conditional updates: the implementation
/// must guarantee that two racing transitions on one job cannot both win.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new job; the repository assigns the id
    async fn insert_job(&self, job: &NewJob) -> Result<Job>;

    /// Find job by ID
    async fn find_job(&self, id: JobId) -> Result<Option<Job>>;

    /// Apply a partial update to a job's booking fields
    async fn update_job(&self, id: JobId, changes: &JobUpdate, now_millis: i64) -> Result<Job>;

    /// All jobs where the user appears as customer or translator
    async fn jobs_for_user(&self, user_id: UserId) -> Result<Vec<Job>>;

    /// Every job (admin listing)
    async fn all_jobs(&self) -> Result<Vec<Job>>;

    /// Finished jobs for a user, most recent first
    async fn job_history_for_user(&self, user_id: UserId) -> Result<Vec<Job>>;

    /// Open, unassigned jobs a translator could take
    async fn potential_jobs_for(&self, translator_id: UserId) -> Result<Vec<Job>>;

    /// Conditionally assign: only a PENDING job with no translator can be taken
    async fn assign_translator(
        &self,
        id: JobId,
        translator_id: UserId,
        now_millis: i64,
    ) -> Result<Job>;

    /// Conditional status transition from any of `from` to `to`
    async fn update_status(
        &self,
        id: JobId,
        from: &[JobStatus],
        to: JobStatus,
        now_millis: i64,
    ) -> Result<()>;

    /// Conditionally complete an ASSIGNED job, recording the session time
    async fn complete_job(&self, id: JobId, session_time: &str, now_millis: i64) -> Result<()>;

    /// Conditionally reopen a CANCELLED/TIMEDOUT job, releasing the translator
    async fn reopen_job(&self, id: JobId, now_millis: i64) -> Result<()>;

    /// Insert or replace the travel record for a job
    async fn upsert_distance(&self, job_id: JobId, distance: &str, time: &str) -> Result<()>;

    /// Travel record for a job, if one has been fed
    async fn find_distance(&self, job_id: JobId) -> Result<Option<Distance>>;

    /// Overwrite a job's admin-review fields
    async fn update_admin_review(
        &self,
        job_id: JobId,
        review: &AdminReview,
        now_millis: i64,
    ) -> Result<()>;
}
