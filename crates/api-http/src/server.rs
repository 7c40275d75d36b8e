//! HTTP Server

use std::future::Future;
use std::sync::Arc;

use tolka_core::application::BookingService;
use tolka_core::error::Result;
use tracing::info;

use crate::routes;
use crate::state::AppState;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 9640;

/// HTTP Server Configuration
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    booking: Arc<BookingService>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, booking: Arc<BookingService>) -> Self {
        Self { config, booking }
    }

    /// Serve until the shutdown future resolves
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting HTTP server"
        );

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let app = routes::router(AppState::new(self.booking));

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
