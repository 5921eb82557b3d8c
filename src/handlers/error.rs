use crate::storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use strum_macros::AsRefStr;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, AsRefStr, ToSchema)]
#[strum(serialize_all = "snake_case")]
pub enum AppError {
    #[error("Todo not found")]
    NotFound,

    #[error("Title is required")]
    TitleRequired,

    #[error("Extra fields not allowed")]
    ExtraFields,

    #[error("ID cannot be updated")]
    IdMismatch,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Invalid deadline_at: {0}")]
    InvalidDeadline(String),

    #[schema(value_type = String)]
    #[error("Internal storage error")]
    InternalStorage(#[source] StorageError),
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound => Self::NotFound,
            _ => Self::InternalStorage(value),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, error_type = %self.as_ref(), "AppError");

        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::TitleRequired
            | AppError::ExtraFields
            | AppError::IdMismatch
            | AppError::InvalidBody { .. }
            | AppError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            // unparsable window and deadline values are not a handled validation case
            AppError::InvalidWindow { .. }
            | AppError::InvalidDeadline { .. }
            | AppError::InternalStorage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
