// Booking Service - one use-case orchestration per operation

pub mod create;
pub mod distance_feed;

pub use create::CreateJobRequest;
pub use distance_feed::DistanceFeedRequest;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    format_session_time, AuthenticatedUser, Job, JobId, JobNotification, JobStatus, JobUpdate,
    Role, UserId,
};
use crate::error::{AppError, Result};
use crate::port::{
    BookingRepository, DispatchReceipt, NotificationDispatcher, PushAudience, TimeProvider,
};

/// Accept request as it arrives in a payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptJobRequest {
    pub job_id: JobId,
}

/// Booking Service
///
/// Orchestrates one booking use case per request: fetch, validate business
/// state, mutate through the repository, trigger side effects, return the
/// outcome. The acting user is always an explicit parameter.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    time: Arc<dyn TimeProvider>,
}

impl BookingService {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        time: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            repo,
            dispatcher,
            time,
        }
    }

    /// List jobs: a named user's jobs for anyone, everything for admins
    pub async fn list_jobs(
        &self,
        user: &AuthenticatedUser,
        for_user: Option<UserId>,
    ) -> Result<Vec<Job>> {
        if let Some(user_id) = for_user {
            return self.repo.jobs_for_user(user_id).await;
        }

        if user.role.can_list_all_jobs() {
            self.repo.all_jobs().await
        } else {
            Err(AppError::Forbidden(
                "only admins may list all jobs".to_string(),
            ))
        }
    }

    pub async fn get_job(&self, id: JobId) -> Result<Job> {
        self.repo
            .find_job(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    pub async fn create_job(
        &self,
        req: CreateJobRequest,
        user: &AuthenticatedUser,
    ) -> Result<Job> {
        create::execute(
            self.repo.as_ref(),
            self.dispatcher.as_ref(),
            self.time.as_ref(),
            req,
            user,
        )
        .await
    }

    /// Apply a partial update to a job's booking fields
    pub async fn update_job(
        &self,
        id: JobId,
        changes: JobUpdate,
        user: &AuthenticatedUser,
    ) -> Result<Job> {
        validate_update(&changes)?;
        let job = self
            .repo
            .update_job(id, &changes, self.time.now_millis())
            .await?;
        tracing::info!(job_id = id, acting_user = user.id, "booking updated");
        Ok(job)
    }

    /// Translator accepts a job from a payload
    pub async fn accept_job(
        &self,
        req: AcceptJobRequest,
        user: &AuthenticatedUser,
    ) -> Result<Job> {
        self.accept_job_with_id(req.job_id, user).await
    }

    /// Translator accepts a job by id.
    ///
    /// The assignment is a conditional update in the repository: of two
    /// racing accepts, exactly one wins.
    pub async fn accept_job_with_id(&self, id: JobId, user: &AuthenticatedUser) -> Result<Job> {
        if user.role != Role::Translator {
            return Err(AppError::Forbidden(
                "only translators can accept jobs".to_string(),
            ));
        }

        let job = self
            .repo
            .assign_translator(id, user.id, self.time.now_millis())
            .await?;
        tracing::info!(job_id = id, translator_id = user.id, "job accepted");
        Ok(job)
    }

    /// Cancel a booking: customers their own, admins any.
    ///
    /// An assigned translator is notified; a failed notice is logged but
    /// does not resurrect the cancelled job.
    pub async fn cancel_job(&self, job_id: JobId, user: &AuthenticatedUser) -> Result<()> {
        let job = self
            .repo
            .find_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

        match user.role {
            Role::Customer if job.customer_id != user.id => {
                return Err(AppError::Forbidden(
                    "customers may only cancel their own jobs".to_string(),
                ));
            }
            Role::Customer => {}
            role if role.is_admin() => {}
            _ => {
                return Err(AppError::Forbidden(
                    "translators cannot cancel jobs".to_string(),
                ));
            }
        }

        self.repo
            .update_status(
                job_id,
                &[JobStatus::Pending, JobStatus::Assigned],
                JobStatus::Cancelled,
                self.time.now_millis(),
            )
            .await?;
        tracing::info!(job_id, acting_user = user.id, "job cancelled");

        if let Some(translator_id) = job.translator_id {
            let notification = JobNotification::from_job(&job);
            if let Err(err) = self
                .dispatcher
                .send_push(&notification, PushAudience::Translator(translator_id))
                .await
            {
                tracing::warn!(job_id, error = %err, "cancellation notice failed");
            }
        }

        Ok(())
    }

    /// End a session: the job completes and the session time is recorded
    pub async fn end_job(&self, job_id: JobId) -> Result<()> {
        let job = self
            .repo
            .find_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

        let now = self.time.now_millis();
        let session_time = format_session_time(job.due_at, now);
        self.repo.complete_job(job_id, &session_time, now).await?;
        tracing::info!(job_id, session_time = %session_time, "session ended");
        Ok(())
    }

    /// Customer did not show up for the session
    pub async fn customer_not_call(&self, job_id: JobId) -> Result<()> {
        self.repo
            .update_status(
                job_id,
                &[JobStatus::Assigned],
                JobStatus::NotCarriedOutCustomer,
                self.time.now_millis(),
            )
            .await?;
        tracing::info!(job_id, "job marked as customer no-show");
        Ok(())
    }

    /// Put a cancelled or timed-out booking back on the market
    pub async fn reopen(&self, job_id: JobId) -> Result<()> {
        self.repo.reopen_job(job_id, self.time.now_millis()).await?;
        tracing::info!(job_id, "job reopened");
        Ok(())
    }

    /// Finished jobs for a user. `user_id` is required.
    pub async fn job_history(
        &self,
        _user: &AuthenticatedUser,
        for_user: Option<UserId>,
    ) -> Result<Vec<Job>> {
        let user_id =
            for_user.ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
        self.repo.job_history_for_user(user_id).await
    }

    /// Open jobs a translator could take
    pub async fn potential_jobs(&self, user: &AuthenticatedUser) -> Result<Vec<Job>> {
        if user.role != Role::Translator {
            return Err(AppError::Forbidden(
                "only translators have potential jobs".to_string(),
            ));
        }
        self.repo.potential_jobs_for(user.id).await
    }

    /// Feed travel data and review flags for one job
    pub async fn distance_feed(&self, req: DistanceFeedRequest) -> Result<()> {
        distance_feed::execute(self.repo.as_ref(), self.time.as_ref(), req).await
    }

    /// Re-announce a job to all suitable translators via push
    pub async fn resend_notifications(&self, job_id: JobId) -> Result<DispatchReceipt> {
        let job = self
            .repo
            .find_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

        let notification = JobNotification::from_job(&job);
        self.dispatcher
            .send_push(&notification, PushAudience::AllSuitable)
            .await
    }

    /// Re-announce a job via SMS.
    ///
    /// A failed dispatch is the operation failing; it is never folded into
    /// a success response.
    pub async fn resend_sms_notifications(&self, job_id: JobId) -> Result<DispatchReceipt> {
        let job = self
            .repo
            .find_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

        let notification = JobNotification::from_job(&job);
        self.dispatcher.send_sms(&notification).await
    }
}

fn validate_update(changes: &JobUpdate) -> Result<()> {
    if let Some(from_language) = &changes.from_language {
        if from_language.trim().is_empty() {
            return Err(AppError::Validation(
                "from_language must not be empty".to_string(),
            ));
        }
    }
    if let Some(to_language) = &changes.to_language {
        if to_language.trim().is_empty() {
            return Err(AppError::Validation(
                "to_language must not be empty".to_string(),
            ));
        }
    }
    if let Some(duration) = changes.duration_minutes {
        if duration <= 0 {
            return Err(AppError::Validation(
                "duration_minutes must be positive".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::time_provider::FixedTimeProvider;
    use crate::port::{MockBookingRepository, MockNotificationDispatcher};

    fn service(
        repo: MockBookingRepository,
        dispatcher: MockNotificationDispatcher,
    ) -> BookingService {
        BookingService::new(
            Arc::new(repo),
            Arc::new(dispatcher),
            Arc::new(FixedTimeProvider(1_000)),
        )
    }

    fn sample_job(id: JobId) -> Job {
        Job {
            id,
            customer_id: 10,
            translator_id: None,
            status: JobStatus::Pending,
            from_language: "swedish".to_string(),
            to_language: "english".to_string(),
            due_at: 500,
            duration_minutes: 30,
            immediate: false,
            remarks: None,
            session_time: String::new(),
            admin_comments: String::new(),
            flagged: false,
            manually_handled: false,
            by_admin: false,
            created_at: 100,
            updated_at: 100,
        }
    }

    fn customer() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 10,
            role: Role::Customer,
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            role: Role::Admin,
        }
    }

    fn translator() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 77,
            role: Role::Translator,
        }
    }

    #[tokio::test]
    async fn named_user_listing_ignores_requester_role() {
        let mut repo = MockBookingRepository::new();
        repo.expect_jobs_for_user()
            .withf(|user_id| *user_id == 99)
            .times(1)
            .returning(|_| Ok(vec![]));

        let svc = service(repo, MockNotificationDispatcher::new());
        svc.list_jobs(&customer(), Some(99)).await.unwrap();
    }

    #[tokio::test]
    async fn unfiltered_listing_requires_admin() {
        let mut repo = MockBookingRepository::new();
        repo.expect_all_jobs().times(1).returning(|| Ok(vec![]));

        let svc = service(repo, MockNotificationDispatcher::new());
        svc.list_jobs(&admin(), None).await.unwrap();

        let svc = service(
            MockBookingRepository::new(),
            MockNotificationDispatcher::new(),
        );
        let err = svc.list_jobs(&customer(), None).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn get_job_not_found() {
        let mut repo = MockBookingRepository::new();
        repo.expect_find_job().returning(|_| Ok(None));

        let svc = service(repo, MockNotificationDispatcher::new());
        let err = svc.get_job(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn only_translators_accept() {
        let svc = service(
            MockBookingRepository::new(),
            MockNotificationDispatcher::new(),
        );
        let err = svc.accept_job_with_id(42, &customer()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn accept_delegates_conditional_assignment() {
        let mut repo = MockBookingRepository::new();
        repo.expect_assign_translator()
            .withf(|id, translator_id, _| *id == 42 && *translator_id == 77)
            .times(1)
            .returning(|id, translator_id, now| {
                let mut job = sample_job(id);
                job.accept(translator_id, now).unwrap();
                Ok(job)
            });

        let svc = service(repo, MockNotificationDispatcher::new());
        let job = svc.accept_job_with_id(42, &translator()).await.unwrap();
        assert_eq!(job.status, JobStatus::Assigned);
        assert_eq!(job.translator_id, Some(77));
    }

    #[tokio::test]
    async fn customer_cannot_cancel_foreign_job() {
        let mut repo = MockBookingRepository::new();
        repo.expect_find_job().returning(|id| {
            let mut job = sample_job(id);
            job.customer_id = 11; // someone else's booking
            Ok(Some(job))
        });

        let svc = service(repo, MockNotificationDispatcher::new());
        let err = svc.cancel_job(42, &customer()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn cancel_notifies_assigned_translator() {
        let mut repo = MockBookingRepository::new();
        repo.expect_find_job().returning(|id| {
            let mut job = sample_job(id);
            job.accept(77, 200).unwrap();
            Ok(Some(job))
        });
        repo.expect_update_status()
            .withf(|id, from, to, _| {
                *id == 42
                    && *from == [JobStatus::Pending, JobStatus::Assigned]
                    && *to == JobStatus::Cancelled
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_send_push()
            .withf(|notification, audience| {
                notification.job_id == 42 && *audience == PushAudience::Translator(77)
            })
            .times(1)
            .returning(|_, _| Ok(DispatchReceipt::new()));

        let svc = service(repo, dispatcher);
        svc.cancel_job(42, &admin()).await.unwrap();
    }

    #[tokio::test]
    async fn end_job_records_session_time_from_due() {
        let mut repo = MockBookingRepository::new();
        repo.expect_find_job()
            .returning(|id| Ok(Some(sample_job(id)))); // due_at = 500
        repo.expect_complete_job()
            // FixedTimeProvider(1_000) - due 500 = 500 ms, rounds down to zero seconds
            .withf(|id, session_time, now| *id == 42 && session_time == "00:00:00" && *now == 1_000)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let svc = service(repo, MockNotificationDispatcher::new());
        svc.end_job(42).await.unwrap();
    }

    #[tokio::test]
    async fn history_requires_user_id() {
        let svc = service(
            MockBookingRepository::new(),
            MockNotificationDispatcher::new(),
        );
        let err = svc.job_history(&admin(), None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn potential_jobs_is_translator_only() {
        let mut repo = MockBookingRepository::new();
        repo.expect_potential_jobs_for()
            .withf(|translator_id| *translator_id == 77)
            .times(1)
            .returning(|_| Ok(vec![]));

        let svc = service(repo, MockNotificationDispatcher::new());
        svc.potential_jobs(&translator()).await.unwrap();

        let svc = service(
            MockBookingRepository::new(),
            MockNotificationDispatcher::new(),
        );
        let err = svc.potential_jobs(&customer()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn sms_resend_failure_surfaces_as_error() {
        let mut repo = MockBookingRepository::new();
        repo.expect_find_job()
            .returning(|id| Ok(Some(sample_job(id))));

        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_send_sms()
            .returning(|_| Err(AppError::Dispatch("SMS gateway timeout".to_string())));

        let svc = service(repo, dispatcher);
        let err = svc.resend_sms_notifications(42).await.unwrap_err();
        assert!(matches!(err, AppError::Dispatch(_)));
    }

    #[tokio::test]
    async fn resend_push_targets_all_suitable_translators() {
        let mut repo = MockBookingRepository::new();
        repo.expect_find_job()
            .returning(|id| Ok(Some(sample_job(id))));

        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_send_push()
            .withf(|notification, audience| {
                notification.job_id == 42 && *audience == PushAudience::AllSuitable
            })
            .times(1)
            .returning(|_, _| Ok(DispatchReceipt::new()));

        let svc = service(repo, dispatcher);
        svc.resend_notifications(42).await.unwrap();
    }

    #[tokio::test]
    async fn update_rejects_nonpositive_duration() {
        let svc = service(
            MockBookingRepository::new(),
            MockNotificationDispatcher::new(),
        );
        let changes = JobUpdate {
            duration_minutes: Some(0),
            ..Default::default()
        };
        let err = svc.update_job(42, changes, &admin()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
