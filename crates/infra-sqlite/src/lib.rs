// Tolka Infrastructure - SQLite Adapter
// Implements: BookingRepository

mod booking_repository;
mod connection;
mod migration;

pub use booking_repository::SqliteBookingRepository;
pub use connection::create_pool;
pub use migration::run_migrations;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
