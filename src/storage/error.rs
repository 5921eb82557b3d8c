use std::num::{ParseIntError, TryFromIntError};

use thiserror::Error;

pub use super::sea::error::SeaStorageError;
use strum_macros::AsRefStr;

#[derive(Error, Debug, AsRefStr)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("No content")]
    NoContent,

    #[error("Failed to parse id from string")]
    ParseIdFromString(#[from] ParseIntError),

    #[error("Id is out of range")]
    IdOutOfRange(#[from] TryFromIntError),

    #[error("Internal storage error")]
    Internal(#[source] SeaStorageError),
}
