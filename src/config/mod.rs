pub(crate) mod types;

use std::net::SocketAddr;

use config::{Config, Environment, File};
use serde::Deserialize;
pub(crate) use types::{ServerConfig, SqlConfig, StorageKind, StorageSettings, TelemetryConfig};

use crate::{init::StartupError, trace_err};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub(crate) storage: StorageSettings,
    pub(crate) telemetry: TelemetryConfig,
    pub(crate) server: ServerConfig,
}

impl Settings {
    pub fn new() -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or("development".into());

        Settings::from_file(&run_mode)
    }

    pub fn from_file(file_name: &str) -> Result<Self, StartupError> {
        trace_err!(
            Config::builder()
                .add_source(File::with_name("config/default"))
                .add_source(File::with_name(&format!("config/{file_name}")).required(false))
                .add_source(Environment::with_prefix("APP").separator("__"))
                .build()?
                .try_deserialize(),
            "failed to build app settings"
        )
        .map_err(Into::into)
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server.addr
    }

    pub fn tracing_enabled(&self) -> bool {
        self.telemetry.tracing
    }

    pub fn metrics_enabled(&self) -> bool {
        self.telemetry.metrics
    }

    pub fn stdout_tracing_enabled(&self) -> bool {
        self.telemetry.stdout_tracing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_use_in_memory_sqlite() {
        let settings = Settings::from_file("test").unwrap();

        assert_eq!(settings.storage.backend, StorageKind::Sqlite);
        let sql = settings.storage.selected().unwrap();
        assert_eq!(sql.url, "sqlite::memory:");
        assert_eq!(sql.max_connections, 1);
        assert!(!settings.tracing_enabled());
        assert!(!settings.metrics_enabled());
    }

    #[test]
    fn test_missing_backend_section() {
        let storage = StorageSettings {
            backend: StorageKind::Postgres,
            sqlite: None,
            postgres: None,
        };

        assert!(storage.selected().is_none());
        assert_eq!(storage.backend.as_ref(), "postgres");
    }
}
