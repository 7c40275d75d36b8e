// Port Layer - Interfaces for external dependencies

pub mod booking_repository;
pub mod notification_dispatcher;
pub mod time_provider;

// Re-exports
pub use booking_repository::BookingRepository;
pub use notification_dispatcher::{
    DispatchReceipt, NotificationDispatcher, PushAudience, TracingDispatcher,
};
pub use time_provider::TimeProvider;

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
#[cfg(test)]
pub use notification_dispatcher::MockNotificationDispatcher;
