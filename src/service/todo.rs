use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::{
    handlers::{error::AppError, TodoPayload},
    storage::{StorageError, Todo, TodoFilter, TodoId, TodoStorage},
    utils::measure_metrics::measure_service,
};

pub struct ServiceTodoRef {
    storage: Arc<dyn TodoStorage>,
}

impl ServiceTodoRef {
    pub(crate) fn new(storage: Arc<dyn TodoStorage>) -> Self {
        Self { storage }
    }

    #[instrument(name = "Service::todo::add", skip_all)]
    pub(crate) async fn add(&self, payload: TodoPayload) -> Result<Todo, AppError> {
        measure_service("add_todo", || async move {
            let new_todo = payload.into_new_todo()?;
            self.storage.put(new_todo).await.map_err(AppError::from)
        })
        .await
    }

    #[instrument(name = "Service::todo::get", skip_all, fields(todo_id = %todo_id))]
    pub(crate) async fn get(&self, todo_id: TodoId) -> Result<Todo, AppError> {
        measure_service("get_todo", || async { self.storage.get(todo_id).await })
            .await
            .map_err(Into::into)
    }

    #[instrument(name = "Service::todo::get_all", skip_all, fields(filter = ?filter))]
    pub(crate) async fn get_all(&self, filter: TodoFilter) -> Result<Vec<Todo>, AppError> {
        let todos = measure_service("get_all_todos", || async {
            self.storage.get_all().await
        })
        .await?;

        let now = Utc::now().naive_utc();
        let total = todos.len();
        let selected: Vec<Todo> = todos
            .into_iter()
            .filter(|todo| filter.matches(todo, now))
            .collect();

        info!(total, selected = selected.len(), "filtered todos");

        Ok(selected)
    }

    /// The todo must exist before the body is validated, so a missing id
    /// always answers 404 whatever the payload holds.
    #[instrument(
        name = "Service::todo::update",
        skip_all,
        fields(todo_id = %id,
        title_is_some = payload.title.is_some(),
        description_is_some = payload.description.is_some(),
        completed_is_some = payload.completed.is_some(),
        deadline_is_some = payload.deadline_at.is_some()))
    ]
    pub(crate) async fn update(&self, id: TodoId, payload: TodoPayload) -> Result<Todo, AppError> {
        info!(todo_id = %id, "update todo");

        measure_service("update_todo", || async move {
            self.storage.get(id).await?;
            let patch = payload.into_patch(id)?;
            self.storage.update(id, patch).await.map_err(AppError::from)
        })
        .await
    }

    /// Returns `None` when there was nothing to delete.
    #[instrument(name = "Service::todo::delete", skip_all, fields(todo_id = %todo_id))]
    pub(crate) async fn delete(&self, todo_id: TodoId) -> Result<Option<Todo>, AppError> {
        info!(todo_id = %todo_id, "delete todo");

        let result = measure_service("delete_todo", || async {
            match self.storage.delete(todo_id).await {
                Ok(todo) => Ok(Some(todo)),
                Err(StorageError::NoContent) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await?;

        Ok(result)
    }
}
