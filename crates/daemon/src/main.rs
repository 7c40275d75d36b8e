//! Tolka Booking Service - Main Entry Point
//! Composition root: settings, logging, DI wiring, HTTP server

mod settings;
mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use settings::Settings;
use tolka_api_http::{HttpServer, HttpServerConfig};
use tolka_core::application::BookingService;
use tolka_core::port::notification_dispatcher::TracingDispatcher;
use tolka_core::port::time_provider::SystemTimeProvider;
use tolka_infra_sqlite::{create_pool, run_migrations, SqliteBookingRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (JSON for production, pretty for development)
    let log_format = std::env::var("TOLKA_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("tolka=info"))
        .expect("Failed to create env filter");

    // With TOLKA_LOG_DIR set, JSON logs go to a daily-rolling file instead of stdout
    let _guard = match std::env::var("TOLKA_LOG_DIR") {
        Ok(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "tolka-booking.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
            Some(guard)
        }
        Err(_) => {
            match log_format.as_str() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().json())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }
            None
        }
    };

    info!("Tolka Booking Service v{} starting...", VERSION);

    // 1.1. Initialize OpenTelemetry (optional)
    if let Err(e) = telemetry::init_telemetry() {
        tracing::warn!(error = ?e, "Failed to initialize OpenTelemetry (continuing without it)");
    }

    // 2. Load configuration
    let settings = Settings::load().map_err(|e| anyhow::anyhow!("Config load failed: {}", e))?;
    let db_path = settings.database_path();

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let dispatcher = Arc::new(TracingDispatcher);
    let repo = Arc::new(SqliteBookingRepository::new(pool));
    let booking = Arc::new(BookingService::new(repo, dispatcher, time_provider));

    // 5. Start HTTP server
    let http_config = HttpServerConfig {
        host: settings.http.host.clone(),
        port: settings.http.port,
    };
    let server = HttpServer::new(http_config, booking);

    info!("System ready. Press Ctrl+C to shutdown");

    // 6. Serve until the shutdown signal arrives
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received. Exiting gracefully...");
    };

    server
        .run(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))?;

    info!("Shutdown complete.");

    Ok(())
}
