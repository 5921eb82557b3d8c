use axum::{
    body::Body,
    extract::Request,
    http::{Response, StatusCode},
    middleware::Next,
};

use opentelemetry::KeyValue;
use tokio::time::Instant;
use tracing::{debug, info_span, instrument};

use crate::{middleware::normalize_uri, utils::metrics};

fn status_group(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}

#[instrument(name = "middleware::record_metrics", skip_all)]
pub(crate) async fn record_metrics(
    request: Request,
    next: Next,
) -> Result<Response<Body>, StatusCode> {
    let method = request.method().to_string();
    let uri = normalize_uri(request.uri().path());

    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();

    let status = response.status();
    let status_str = status.as_str().to_string();
    let status_group = status_group(status);

    debug!(?elapsed, %method, %uri, %status_str, %status_group, "request served");

    let attributes = [
        KeyValue::new("method", method),
        KeyValue::new("uri", uri),
        KeyValue::new("status_group", status_group),
        KeyValue::new("http_status_code", status_str),
    ];

    info_span!("record metric HTTP_REQUESTS").in_scope(|| metrics::HTTP_REQUESTS.add(1, &attributes));

    info_span!("record metric HTTP_REQUEST_DURATION").in_scope(|| {
        metrics::HTTP_REQUEST_DURATION.record(elapsed.as_secs_f64() * 1000.0, &attributes)
    });

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_status_codes() {
        assert_eq!(status_group(StatusCode::CREATED), "2xx");
        assert_eq!(status_group(StatusCode::NOT_FOUND), "4xx");
        assert_eq!(status_group(StatusCode::INTERNAL_SERVER_ERROR), "5xx");
    }
}
