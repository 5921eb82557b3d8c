use super::error::AppError;
use super::types::*;
use crate::{handlers::Service, storage::Todo, utils::RootSpan};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;
use tracing::info;

#[utoipa::path(
    get,
    path = "/api/v1/todos",
    params(
        ("window" = Option<i64>, Query, description = "Only todos due within this many days, overdue included"),
        ("completed" = Option<String>, Query, description = "\"true\" for completed todos, anything else for open ones")
    ),
    responses(
        (status = 200, description = "List todos", body = [Todo]),
        (status = 500, description = "window is not an integer", body = ErrorBody),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::get_all", skip_all)]
pub(crate) async fn get_all(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    params: ListParams,
) -> Result<impl IntoResponse, AppError> {
    root_span.record().todo_filter(&params);

    info!(list_params = ?params, "get all todos");

    let items = service.todo().get_all(params.into()).await?;

    info!("Get {} ToDos", items.len());

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/v1/todos/{id}",
    params(
        ("id" = i32, Path, description = "ToDo ID")
    ),
    responses(
        (status = 200, description = "Get ToDo by ID", body = Todo),
        (status = 404, description = "ToDo not found", body = ErrorBody),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::get", skip_all)]
pub(crate) async fn get(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    TodoPath(id): TodoPath,
) -> Result<impl IntoResponse, AppError> {
    root_span.record().todo_id(&id);

    let todo = service.todo().get(id).await?;

    tracing::info!(todo = ?todo, "Get ToDo");

    Ok(Json(todo))
}

#[utoipa::path(
    post,
    path = "/api/v1/todos",
    request_body(
        content = TodoBody,
        description = "New ToDo item, `title` is required",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "ToDo created", body = Todo),
        (status = 400, description = "Missing title or extra fields", body = ErrorBody),
        (status = 500, description = "Malformed deadline_at", body = ErrorBody),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::post", skip_all)]
pub(crate) async fn add(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    TodoJson(input): TodoJson,
) -> Result<impl IntoResponse, AppError> {
    match service.todo().add(input).await {
        Ok(todo) => {
            root_span.record().todo_id(&todo.id);
            Ok((StatusCode::CREATED, Json(todo)))
        }
        Err(e) => {
            tracing::error!(err = ?e, "failed to add new ToDo");
            Err(e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/todos/{id}",
    params(
        ("id" = i32, Path, description = "ToDo ID")
    ),
    request_body(
        content = TodoBody,
        description = "Fields to replace, absent fields are left unchanged",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "ToDo updated", body = Todo),
        (status = 400, description = "ID mismatch or extra fields", body = ErrorBody),
        (status = 404, description = "ToDo not found", body = ErrorBody),
        (status = 500, description = "Malformed deadline_at", body = ErrorBody),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::update", skip_all)]
pub(crate) async fn update(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    TodoPath(id): TodoPath,
    TodoJson(input): TodoJson,
) -> Result<impl IntoResponse, AppError> {
    root_span.record().todo_id(&id);

    let todo = service.todo().update(id, input).await?;

    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/api/v1/todos/{id}",
    params(
        ("id" = i32, Path, description = "ToDo ID")
    ),
    responses(
        (status = 200, description = "Deleted ToDo, or an empty object when there was none", body = Todo),
    ),
    tag = "todos"
)]
#[tracing::instrument(name = "handlers::todo::delete", skip_all)]
pub(crate) async fn delete(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    TodoPath(id): TodoPath,
) -> Result<impl IntoResponse, AppError> {
    root_span.record().todo_id(&id);

    let body = match service.todo().delete(id).await? {
        Some(todo) => json!(todo),
        None => {
            info!(todo_id = %id, "nothing to delete");
            json!({})
        }
    };

    Ok(Json(body))
}
