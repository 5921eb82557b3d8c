pub(crate) mod todo;

use std::sync::Arc;

use crate::{
    handlers::error::AppError,
    storage::{CloseStorage, TodoStorage},
    utils::measure_metrics::measure_service,
};
use todo::ServiceTodoRef;
use tracing::instrument;

#[derive(Clone)]
pub struct Service {
    todo_storage: Arc<dyn TodoStorage>,
    close_storage: Arc<dyn CloseStorage>,
}

impl Service {
    #[instrument(name = "Service::new", skip_all)]
    pub fn new(todo_storage: Arc<dyn TodoStorage>, close_storage: Arc<dyn CloseStorage>) -> Self {
        Self {
            todo_storage,
            close_storage,
        }
    }

    pub fn todo(&self) -> ServiceTodoRef {
        ServiceTodoRef::new(self.todo_storage.clone())
    }

    #[instrument(name = "Service::close_storage", skip_all)]
    pub async fn close_storage(&self) -> Result<(), AppError> {
        measure_service("close_storage", || async {
            self.close_storage.close().await.map_err(Into::into)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::TodoPayload,
        storage::{test_util::TestStorageBuilder, TodoFilter, TodoId},
    };
    use serde_json::json;

    async fn service(count: usize) -> Service {
        let builder = TestStorageBuilder::new().await.with_todos(count);
        let (todo_storage, _) = builder.build_todo().await;
        Service::new(todo_storage, builder.build_close().await)
    }

    fn payload(value: serde_json::Value) -> TodoPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let service = service(0).await;

        let todo = service
            .todo()
            .add(payload(json!({"title": "A", "deadline_at": "2030-01-01T00:00:00"})))
            .await
            .unwrap();
        assert!(!todo.completed);
        assert!(todo.deadline_at.is_some());

        let fetched = service.todo().get(todo.id).await.unwrap();
        assert_eq!(fetched, todo);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_payload() {
        let service = service(0).await;

        let result = service.todo().add(payload(json!({"title": "A", "x": 1}))).await;
        assert!(matches!(result, Err(AppError::ExtraFields)));

        let all = service.todo().get_all(TodoFilter::All).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_by_completion() {
        let service = service(5).await;

        let done = service
            .todo()
            .get_all(TodoFilter::Completed(true))
            .await
            .unwrap();
        assert_eq!(done.len(), 3);
        assert!(done.iter().all(|t| t.completed));

        let open = service
            .todo()
            .get_all(TodoFilter::Completed(false))
            .await
            .unwrap();
        assert_eq!(open.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_todo_is_not_found() {
        let service = service(0).await;

        // payload is invalid too, the lookup decides first
        let result = service
            .todo()
            .update(TodoId::from(77), payload(json!({"foo": 1})))
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = service(1).await;
        let id = service.todo().get_all(TodoFilter::All).await.unwrap()[0].id;

        let updated = service
            .todo()
            .update(id, payload(json!({"title": "renamed", "id": id.get()})))
            .await
            .unwrap();
        assert_eq!(updated.title, "renamed");

        let removed = service.todo().delete(id).await.unwrap();
        assert_eq!(removed, Some(updated));

        let removed = service.todo().delete(id).await.unwrap();
        assert_eq!(removed, None);
    }
}
