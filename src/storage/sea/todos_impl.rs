use crate::storage::{NewTodo, StorageError, Todo, TodoId, TodoStorage, UpdateTodo};
use crate::trace_err;
use crate::utils::measure_metrics::measure_storage;

use super::entity::{self, Entity as Todos};
use super::error::SeaStorageError;
use super::SeaStorage;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, TransactionTrait};
use tracing::{error, info, instrument, warn};

#[async_trait]
impl TodoStorage for SeaStorage {
    #[instrument(name = "SeaStorage::get_todo", skip_all)]
    async fn get(&self, id: TodoId) -> Result<Todo, StorageError> {
        info!(todo_id = %id, "get todo");

        measure_storage(self.kind, "SeaStorage::get_todo", || async {
            let model = trace_err!(
                Todos::find_by_id(i32::from(id)).one(&self.db).await,
                "failed to read todo from storage"
            )?;

            model.map(Todo::from).ok_or(SeaStorageError::NotFound)
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "SeaStorage::get_all_todos", skip_all)]
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError> {
        info!("get all todos");

        measure_storage(self.kind, "SeaStorage::get_all_todos", || async {
            let models = trace_err!(
                Todos::find()
                    .order_by_asc(entity::Column::Id)
                    .all(&self.db)
                    .await,
                "failed to read todos from storage"
            )?;

            Ok::<_, SeaStorageError>(models.into_iter().map(Todo::from).collect::<Vec<_>>())
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "SeaStorage::put_todo", skip_all)]
    async fn put(&self, item: NewTodo) -> Result<Todo, StorageError> {
        info!(has_deadline = item.deadline_at.is_some(), "put todo");

        measure_storage(self.kind, "SeaStorage::put_todo", move || async move {
            let txn = trace_err!(self.db.begin().await, "failed to begin transaction")?;

            let model = trace_err!(
                entity::ActiveModel::from(item).insert(&txn).await,
                "failed to insert todo into storage"
            )?;

            trace_err!(txn.commit().await, "failed to commit new todo")?;

            info!(todo_id = model.id, "todo inserted");

            Ok::<Todo, SeaStorageError>(model.into())
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "SeaStorage::update_todo", skip_all)]
    async fn update(&self, id: TodoId, patch: UpdateTodo) -> Result<Todo, StorageError> {
        info!(todo_id = %id, "update todo");

        measure_storage(self.kind, "SeaStorage::update_todo", move || async move {
            let txn = trace_err!(self.db.begin().await, "failed to begin transaction")?;

            let Some(model) = trace_err!(
                Todos::find_by_id(i32::from(id)).one(&txn).await,
                "failed to read todo from storage"
            )?
            else {
                error!("failed to find todo in the storage");
                return Err(SeaStorageError::NotFound);
            };

            let mut active: entity::ActiveModel = model.into();
            active.apply(patch);

            let model = trace_err!(
                active.update(&txn).await,
                "failed to write todo into storage"
            )?;

            trace_err!(txn.commit().await, "failed to commit todo update")?;

            Ok(model.into())
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "SeaStorage::delete_todo", skip_all)]
    async fn delete(&self, id: TodoId) -> Result<Todo, StorageError> {
        info!(todo_id = %id, "delete todo");

        measure_storage(self.kind, "SeaStorage::delete_todo", || async {
            let txn = trace_err!(self.db.begin().await, "failed to begin transaction")?;

            let Some(model) = trace_err!(
                Todos::find_by_id(i32::from(id)).one(&txn).await,
                "failed to read todo from storage"
            )?
            else {
                warn!(todo_id = %id, "Tried to remove non-existing todo");
                return Err(SeaStorageError::NoContent);
            };

            let removed = Todo::from(model.clone());

            trace_err!(
                model.delete(&txn).await,
                "failed to remove todo from storage"
            )?;

            trace_err!(txn.commit().await, "failed to commit todo removal")?;

            Ok(removed)
        })
        .await
        .map_err(Into::into)
    }
}
