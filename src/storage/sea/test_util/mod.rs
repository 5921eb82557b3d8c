#![allow(dead_code)]
use std::sync::Arc;

use crate::{
    config::StorageKind,
    storage::{CloseStorage, NewTodo, Todo, TodoStorage},
};
use sea_orm::{ConnectOptions, Database};

use super::SeaStorage;

/// In-memory sqlite storage. Every builder owns its own database, a single
/// pooled connection keeps it alive for the builder's lifetime.
pub struct TestStorageBuilder {
    todos: Vec<NewTodo>,
    todo_storage: Arc<dyn TodoStorage>,
    close_storage: Arc<dyn CloseStorage>,
}

impl TestStorageBuilder {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        let sea_storage = Arc::new(
            SeaStorage::from_connection(db, StorageKind::Sqlite)
                .await
                .unwrap(),
        );

        Self {
            todos: Vec::new(),
            todo_storage: sea_storage.clone() as Arc<dyn TodoStorage>,
            close_storage: sea_storage.clone() as Arc<dyn CloseStorage>,
        }
    }

    pub fn with_todos(mut self, count: usize) -> Self {
        self.todos = (0..count)
            .map(|i| NewTodo {
                description: Some(format!("description {}", i)),
                completed: i % 2 == 0,
                ..NewTodo::new(format!("todo {}", i))
            })
            .collect();
        self
    }

    /// Inserts the prepared todos and returns them as stored.
    pub async fn build_todo(&self) -> (Arc<dyn TodoStorage>, Vec<Todo>) {
        let mut stored = Vec::with_capacity(self.todos.len());
        for todo in &self.todos {
            stored.push(self.todo_storage.put(todo.clone()).await.unwrap());
        }

        (self.todo_storage.clone(), stored)
    }

    pub async fn build_close(&self) -> Arc<dyn CloseStorage> {
        self.close_storage.clone()
    }
}
