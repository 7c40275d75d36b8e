//! Daemon Settings
//!
//! Layered configuration: an optional `tolka.toml` file, overridden by
//! `TOLKA_*` environment variables (`TOLKA_HTTP__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_DB_PATH: &str = "~/.tolka/booking.db";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9640
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("TOLKA_CONFIG").unwrap_or_else(|_| "tolka".to_string());

        Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("TOLKA").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Database path with `~` expanded
    pub fn database_path(&self) -> String {
        shellexpand::tilde(&self.database.path).into_owned()
    }
}
