pub(crate) mod error;
pub(crate) mod todo;
pub mod types;

pub(crate) use crate::service::Service;
use axum::{response::IntoResponse, Json};
pub(crate) use types::*;

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus),
    ),
    tag = "health"
)]
#[tracing::instrument(name = "health", skip_all)]
pub(crate) async fn health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}
