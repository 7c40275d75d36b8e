//! Shared handler state

use std::sync::Arc;

use tolka_core::application::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub booking: Arc<BookingService>,
}

impl AppState {
    pub fn new(booking: Arc<BookingService>) -> Self {
        Self { booking }
    }
}
