//! HTTP API for the Tolka booking service
//!
//! A pure mapping layer: decode transport input, invoke the booking
//! service, map domain outcomes to status codes. No business logic here.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use server::{HttpServer, HttpServerConfig};
pub use state::AppState;
