use sea_orm::DbErr;
use strum_macros::AsRefStr;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug, AsRefStr)]
pub enum SeaStartupError {
    #[error("Failed to connect to database")]
    Connect(#[source] DbErr),

    #[error("Failed to create todos table")]
    CreateSchema(#[source] DbErr),
}

#[derive(Error, Debug, AsRefStr)]
pub enum SeaStorageError {
    #[error("Row for id not found")]
    NotFound,

    #[error("No row to remove for id")]
    NoContent,

    #[error("Database error")]
    Db(#[from] DbErr),
}

impl From<SeaStorageError> for StorageError {
    fn from(value: SeaStorageError) -> Self {
        match value {
            SeaStorageError::NotFound => {
                tracing::warn!(error = ?value, error_type = %value.as_ref(), "Record not found by id");
                Self::NotFound
            }
            SeaStorageError::NoContent => {
                tracing::warn!(error = ?value, error_type = %value.as_ref(), "No content for id");
                Self::NoContent
            }
            _ => {
                tracing::error!(error = ?value, error_type = %value.as_ref(), "Storage error");
                Self::Internal(value)
            }
        }
    }
}
