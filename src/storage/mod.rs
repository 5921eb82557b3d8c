mod error;
mod filter;
mod ids;
mod sea;
mod todo;

#[cfg(any(test, feature = "integration_tests"))]
pub use sea::test_util;
pub(crate) use sea::{error::SeaStartupError, SeaStorage};

use async_trait::async_trait;
pub(crate) use error::StorageError;
pub(crate) use filter::TodoFilter;
pub use todo::Todo;
pub(crate) use todo::{NewTodo, UpdateTodo};

pub use ids::TodoId;

#[async_trait]
pub trait TodoStorage: Send + Sync {
    async fn get(&self, id: TodoId) -> Result<Todo, StorageError>;
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError>;
    async fn put(&self, item: NewTodo) -> Result<Todo, StorageError>;
    async fn update(&self, id: TodoId, patch: UpdateTodo) -> Result<Todo, StorageError>;

    /// Removes the todo and returns its last state, or
    /// `StorageError::NoContent` when there was nothing to remove.
    async fn delete(&self, id: TodoId) -> Result<Todo, StorageError>;
}

#[async_trait]
pub trait CloseStorage: Send + Sync {
    async fn close(&self) -> Result<(), StorageError>;
}
