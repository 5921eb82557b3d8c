use std::future::Future;

use opentelemetry::{metrics::Histogram, KeyValue};
use tokio::time::Instant;

use super::metrics::{SERVICE_OPERATION_DURATION, STORAGE_OPERATION_DURATION};
use crate::config::StorageKind;

/// Runs `f` and records its duration in `histogram`. The outcome is added to
/// `labels`, failures are labelled with the error variant.
async fn timed<F, T, E>(
    histogram: &Histogram<f64>,
    mut labels: Vec<KeyValue>,
    f: impl FnOnce() -> F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: AsRef<str>,
{
    let start = Instant::now();
    let result = f().await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(_) => labels.push(KeyValue::new("outcome", "ok")),
        Err(e) => {
            labels.push(KeyValue::new("outcome", "error"));
            labels.push(KeyValue::new("error", e.as_ref().to_owned()));
        }
    }
    histogram.record(elapsed_ms, &labels);

    result
}

pub async fn measure_service<F, T, E>(operation: &'static str, f: impl FnOnce() -> F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: AsRef<str>,
{
    timed(
        &SERVICE_OPERATION_DURATION,
        vec![KeyValue::new("operation", operation)],
        f,
    )
    .await
}

pub async fn measure_storage<F, T, E>(
    backend: StorageKind,
    operation: &'static str,
    f: impl FnOnce() -> F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: AsRef<str>,
{
    let backend: &'static str = backend.into();
    timed(
        &STORAGE_OPERATION_DURATION,
        vec![
            KeyValue::new("operation", operation),
            KeyValue::new("backend", backend),
        ],
        f,
    )
    .await
}
