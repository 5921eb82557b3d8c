use utoipa::OpenApi;

use crate::handlers::error::AppError;
use crate::handlers::types::{ErrorBody, HealthStatus, TodoBody};
use crate::storage::Todo;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health,
        crate::handlers::todo::get_all,
        crate::handlers::todo::get,
        crate::handlers::todo::add,
        crate::handlers::todo::update,
        crate::handlers::todo::delete,
    ),
    components(
        schemas(Todo, TodoBody, ErrorBody, HealthStatus, AppError),
    ),
    tags(
        (name = "todos", description = "Endpoints to create and manage todo items with deadlines"),
        (name = "health", description = "Liveness check")
    ),
    info(
        title = "Todo API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
