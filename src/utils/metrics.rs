use super::APP_NAME;
use once_cell::sync::Lazy;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use tracing::error;

fn meter() -> Meter {
    global::meter(APP_NAME)
}

fn millis_histogram(name: &'static str, description: &'static str) -> Histogram<f64> {
    meter()
        .f64_histogram(name)
        .with_description(description)
        .with_unit("ms")
        .build()
}

pub static HTTP_REQUESTS: Lazy<Counter<u64>> = Lazy::new(|| {
    meter()
        .u64_counter("todo_api_http_requests_total")
        .with_description("Requests served, by route and status")
        .build()
});

pub static HTTP_REQUEST_DURATION: Lazy<Histogram<f64>> = Lazy::new(|| {
    millis_histogram(
        "todo_api_http_request_duration",
        "Time from routing to response",
    )
});

pub static SERVICE_OPERATION_DURATION: Lazy<Histogram<f64>> = Lazy::new(|| {
    millis_histogram(
        "todo_api_service_operation_duration",
        "Todo service calls, validation included",
    )
});

pub static STORAGE_OPERATION_DURATION: Lazy<Histogram<f64>> = Lazy::new(|| {
    millis_histogram(
        "todo_api_storage_operation_duration",
        "Database round trips per storage call",
    )
});

/// Reports the resident set size of this process on every collection.
pub(crate) fn register_memory_gauge() {
    meter()
        .u64_observable_gauge("todo_api_process_resident_memory")
        .with_description("Resident memory of the service process")
        .with_unit("By")
        .with_callback(|observer| {
            let pid = match sysinfo::get_current_pid() {
                Ok(pid) => pid,
                Err(err) => {
                    error!(%err, "cannot resolve own pid");
                    return;
                }
            };
            let mut system = sysinfo::System::new();
            system.refresh_processes(sysinfo::ProcessesToUpdate::Some(&[pid]), false);
            match system.process(pid) {
                Some(process) => observer.observe(process.memory(), &[]),
                None => error!(%pid, "own process missing from sysinfo"),
            }
        })
        .build();
}
