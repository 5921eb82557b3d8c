use std::net::SocketAddr;

use serde::Deserialize;
use strum_macros::{AsRefStr, IntoStaticStr};

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageKind {
    Sqlite,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageKind,
    pub sqlite: Option<SqlConfig>,
    pub postgres: Option<SqlConfig>,
}

impl StorageSettings {
    pub fn selected(&self) -> Option<&SqlConfig> {
        match self.backend {
            StorageKind::Sqlite => self.sqlite.as_ref(),
            StorageKind::Postgres => self.postgres.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqlConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_sec: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub tracing_endpoint: String,
    pub tracing_sampling_rate: f64,
    pub metrics_endpoint: String,
    pub stdout_tracing: bool,
    pub tracing: bool,
    pub metrics: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}
