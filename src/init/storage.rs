use crate::{
    service::Service,
    storage::{CloseStorage, SeaStorage, TodoStorage},
    Settings,
};
use std::sync::Arc;

use tracing::instrument;

use super::StartupError;

#[instrument(name = "init_storage", skip_all, fields(backend = settings.storage.backend.as_ref()))]
pub async fn init_storage(settings: &Settings) -> Result<Service, StartupError> {
    let kind = settings.storage.backend;
    let sql_config = settings
        .storage
        .selected()
        .ok_or_else(|| StartupError::MissingStorageConfig(kind.as_ref().to_string()))?;

    let sea_storage = Arc::new(SeaStorage::new(kind, sql_config).await?);

    Ok(Service::new(
        sea_storage.clone() as Arc<dyn TodoStorage>,
        sea_storage as Arc<dyn CloseStorage>,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::StorageKind, storage::TodoFilter};

    #[tokio::test]
    async fn test_init_storage_from_test_settings() {
        let settings = Settings::from_file("test").unwrap();

        let service = init_storage(&settings).await.unwrap();
        let todos = service.todo().get_all(TodoFilter::All).await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_init_storage_without_backend_section() {
        let mut settings = Settings::from_file("test").unwrap();
        settings.storage.backend = StorageKind::Postgres;
        settings.storage.postgres = None;

        let result = init_storage(&settings).await;
        assert!(matches!(
            result,
            Err(StartupError::MissingStorageConfig(kind)) if kind == "postgres"
        ));
    }
}
