// Notification Dispatcher Port (Interface)

use crate::domain::{JobNotification, UserId};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Delivery target for a push announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushAudience {
    /// Every translator suitable for the job
    AllSuitable,
    /// One specific translator
    Translator(UserId),
}

/// Receipt handed back by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub id: Uuid,
}

impl DispatchReceipt {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for DispatchReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Interface for notification delivery (push and SMS).
///
/// A failed dispatch is an error, not a soft outcome: callers decide whether
/// it aborts the operation or merely surfaces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Announce a job via push
    async fn send_push(
        &self,
        notification: &JobNotification,
        audience: PushAudience,
    ) -> Result<DispatchReceipt>;

    /// Announce a job via SMS to its suitable translators
    async fn send_sms(&self, notification: &JobNotification) -> Result<DispatchReceipt>;
}

/// Production dispatcher that records dispatches in the log stream.
/// The actual push/SMS transport lives behind an external gateway.
pub struct TracingDispatcher;

#[async_trait]
impl NotificationDispatcher for TracingDispatcher {
    async fn send_push(
        &self,
        notification: &JobNotification,
        audience: PushAudience,
    ) -> Result<DispatchReceipt> {
        let receipt = DispatchReceipt::new();
        tracing::info!(
            job_id = notification.job_id,
            audience = ?audience,
            dispatch_id = %receipt.id,
            "push notification dispatched"
        );
        Ok(receipt)
    }

    async fn send_sms(&self, notification: &JobNotification) -> Result<DispatchReceipt> {
        let receipt = DispatchReceipt::new();
        tracing::info!(
            job_id = notification.job_id,
            dispatch_id = %receipt.id,
            "SMS notification dispatched"
        );
        Ok(receipt)
    }
}
