mod observability;
mod storage;

use crate::storage::SeaStartupError;
use thiserror::Error;

pub use observability::{init_metrics_provider, init_stdout_tracing, init_tracer_provider};
pub use storage::init_storage;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to open storage")]
    OpenStorage(#[from] SeaStartupError),

    #[error("Missing storage config: {0}")]
    MissingStorageConfig(String),

    #[error("Failed to load configs")]
    LoadConfig(#[from] config::ConfigError),

    #[error("Failed to init tracing")]
    InitTracing(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("Failed to set global tracing provider")]
    SetGlobalTracingProvider(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Failed to set log bridge")]
    SetLogger(#[from] tracing_log::log::SetLoggerError),
}
