// Create Booking Use Case

use crate::domain::{AuthenticatedUser, Job, JobNotification, NewJob, Role};
use crate::error::{AppError, Result};
use crate::port::{BookingRepository, NotificationDispatcher, PushAudience, TimeProvider};
use serde::{Deserialize, Serialize};

/// Booking request as validated by the transport layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub from_language: String,
    pub to_language: String,
    pub due_at: i64,
    pub duration_minutes: i64,

    #[serde(default)]
    pub immediate: bool,

    #[serde(default)]
    pub remarks: Option<String>,

    /// Only meaningful when an admin books on behalf of a customer
    #[serde(default)]
    pub customer_id: Option<i64>,
}

fn validate_request(req: &CreateJobRequest) -> Result<()> {
    if req.from_language.trim().is_empty() {
        return Err(AppError::Validation("from_language is required".to_string()));
    }
    if req.to_language.trim().is_empty() {
        return Err(AppError::Validation("to_language is required".to_string()));
    }
    if req.due_at <= 0 {
        return Err(AppError::Validation("due_at is required".to_string()));
    }
    if req.duration_minutes <= 0 {
        return Err(AppError::Validation(
            "duration_minutes must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Execute the create-booking use case.
///
/// Customers book for themselves; admins must name the customer they book
/// for; translators cannot book. The freshly created job is announced to
/// suitable translators, but a failed announcement does not undo the
/// booking (it can be resent later).
pub async fn execute(
    repo: &dyn BookingRepository,
    dispatcher: &dyn NotificationDispatcher,
    time: &dyn TimeProvider,
    req: CreateJobRequest,
    user: &AuthenticatedUser,
) -> Result<Job> {
    validate_request(&req)?;

    let customer_id = match user.role {
        Role::Customer => user.id,
        role if role.is_admin() => req.customer_id.ok_or_else(|| {
            AppError::Validation(
                "customer_id is required when booking on behalf of a customer".to_string(),
            )
        })?,
        _ => {
            return Err(AppError::Forbidden(
                "translators cannot book jobs".to_string(),
            ))
        }
    };

    let now = time.now_millis();
    let new_job = NewJob {
        customer_id,
        from_language: req.from_language,
        to_language: req.to_language,
        due_at: req.due_at,
        duration_minutes: req.duration_minutes,
        immediate: req.immediate,
        remarks: req.remarks,
        created_at: now,
    };

    let job = repo.insert_job(&new_job).await?;
    tracing::info!(job_id = job.id, customer_id, "booking created");

    let notification = JobNotification::from_job(&job);
    if let Err(err) = dispatcher
        .send_push(&notification, PushAudience::AllSuitable)
        .await
    {
        tracing::warn!(job_id = job.id, error = %err, "announcement push failed");
    }

    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::time_provider::FixedTimeProvider;
    use crate::port::{MockBookingRepository, MockNotificationDispatcher};
    use crate::domain::JobStatus;

    fn valid_request() -> CreateJobRequest {
        CreateJobRequest {
            from_language: "swedish".to_string(),
            to_language: "english".to_string(),
            due_at: 5_000_000,
            duration_minutes: 30,
            immediate: false,
            remarks: None,
            customer_id: None,
        }
    }

    fn job_from(new_job: &NewJob) -> Job {
        Job {
            id: 1,
            customer_id: new_job.customer_id,
            translator_id: None,
            status: JobStatus::Pending,
            from_language: new_job.from_language.clone(),
            to_language: new_job.to_language.clone(),
            due_at: new_job.due_at,
            duration_minutes: new_job.duration_minutes,
            immediate: new_job.immediate,
            remarks: new_job.remarks.clone(),
            session_time: String::new(),
            admin_comments: String::new(),
            flagged: false,
            manually_handled: false,
            by_admin: false,
            created_at: new_job.created_at,
            updated_at: new_job.created_at,
        }
    }

    #[tokio::test]
    async fn customer_books_for_themselves() {
        let mut repo = MockBookingRepository::new();
        repo.expect_insert_job()
            .withf(|new_job| new_job.customer_id == 10 && new_job.created_at == 42)
            .returning(|new_job| Ok(job_from(new_job)));

        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_send_push()
            .withf(|_, audience| *audience == PushAudience::AllSuitable)
            .returning(|_, _| Ok(crate::port::DispatchReceipt::new()));

        let user = AuthenticatedUser {
            id: 10,
            role: Role::Customer,
        };
        let job = execute(
            &repo,
            &dispatcher,
            &FixedTimeProvider(42),
            valid_request(),
            &user,
        )
        .await
        .unwrap();

        assert_eq!(job.customer_id, 10);
        assert_eq!(job.status, JobStatus::Pending);
    }

    #[tokio::test]
    async fn admin_must_name_a_customer() {
        let repo = MockBookingRepository::new();
        let dispatcher = MockNotificationDispatcher::new();
        let user = AuthenticatedUser {
            id: 1,
            role: Role::Admin,
        };

        let err = execute(
            &repo,
            &dispatcher,
            &FixedTimeProvider(42),
            valid_request(),
            &user,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn translator_cannot_book() {
        let repo = MockBookingRepository::new();
        let dispatcher = MockNotificationDispatcher::new();
        let user = AuthenticatedUser {
            id: 7,
            role: Role::Translator,
        };

        let err = execute(
            &repo,
            &dispatcher,
            &FixedTimeProvider(42),
            valid_request(),
            &user,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn missing_language_is_rejected_before_any_mutation() {
        // No expectations: touching the repo would panic the mock
        let repo = MockBookingRepository::new();
        let dispatcher = MockNotificationDispatcher::new();
        let user = AuthenticatedUser {
            id: 10,
            role: Role::Customer,
        };

        let mut req = valid_request();
        req.from_language = "  ".to_string();

        let err = execute(&repo, &dispatcher, &FixedTimeProvider(42), req, &user)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn failed_announcement_does_not_undo_the_booking() {
        let mut repo = MockBookingRepository::new();
        repo.expect_insert_job()
            .returning(|new_job| Ok(job_from(new_job)));

        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_send_push()
            .returning(|_, _| Err(AppError::Dispatch("gateway down".to_string())));

        let user = AuthenticatedUser {
            id: 10,
            role: Role::Customer,
        };
        let job = execute(
            &repo,
            &dispatcher,
            &FixedTimeProvider(42),
            valid_request(),
            &user,
        )
        .await
        .unwrap();

        assert_eq!(job.id, 1);
    }
}
