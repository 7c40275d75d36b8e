//! Shared helpers for the integration test suite

use std::sync::Arc;

use async_trait::async_trait;
use tolka_core::application::booking::CreateJobRequest;
use tolka_core::application::BookingService;
use tolka_core::domain::{AuthenticatedUser, JobNotification, Role};
use tolka_core::error::{AppError, Result};
use tolka_core::port::time_provider::SystemTimeProvider;
use tolka_core::port::{
    DispatchReceipt, NotificationDispatcher, PushAudience, TracingDispatcher,
};
use tolka_infra_sqlite::{create_pool, run_migrations, SqliteBookingRepository};

/// Dispatcher whose SMS transport is down; push still works
pub struct FailingSmsDispatcher;

#[async_trait]
impl NotificationDispatcher for FailingSmsDispatcher {
    async fn send_push(
        &self,
        _notification: &JobNotification,
        _audience: PushAudience,
    ) -> Result<DispatchReceipt> {
        Ok(DispatchReceipt::new())
    }

    async fn send_sms(&self, _notification: &JobNotification) -> Result<DispatchReceipt> {
        Err(AppError::Dispatch("SMS gateway timeout".to_string()))
    }
}

pub fn customer(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        role: Role::Customer,
    }
}

pub fn translator(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        role: Role::Translator,
    }
}

pub fn admin(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        role: Role::Admin,
    }
}

pub fn booking_request() -> CreateJobRequest {
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

/// Fresh service over a named in-memory database.
///
/// Names must be unique per test: shared-cache in-memory databases are
/// process-global by name.
pub async fn setup_service(db_name: &str) -> Arc<BookingService> {
    setup_service_with_dispatcher(db_name, Arc::new(TracingDispatcher)).await
}

/// Service plus direct repository access for persistence assertions
pub async fn setup_stack(
    db_name: &str,
) -> (Arc<BookingService>, Arc<SqliteBookingRepository>) {
    let url = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);
    let pool = create_pool(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteBookingRepository::new(pool));
    let service = Arc::new(BookingService::new(
        repo.clone(),
        Arc::new(TracingDispatcher),
        Arc::new(SystemTimeProvider),
    ));
    (service, repo)
}

pub async fn setup_service_with_dispatcher(
    db_name: &str,
    dispatcher: Arc<dyn NotificationDispatcher>,
) -> Arc<BookingService> {
    let url = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);
    let pool = create_pool(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteBookingRepository::new(pool));
    Arc::new(BookingService::new(
        repo,
        dispatcher,
        Arc::new(SystemTimeProvider),
    ))
}
