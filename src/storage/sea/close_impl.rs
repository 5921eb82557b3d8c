use super::error::SeaStorageError;
use super::SeaStorage;
use crate::{
    storage::{CloseStorage, StorageError},
    trace_err,
    utils::measure_metrics::measure_storage,
};
use async_trait::async_trait;
use tracing::instrument;

#[async_trait]
impl CloseStorage for SeaStorage {
    #[instrument(name = "SeaStorage::close", skip_all)]
    async fn close(&self) -> Result<(), StorageError> {
        measure_storage(self.kind, "SeaStorage::close", || async {
            // clones share the pool, closing any of them closes it for all
            trace_err!(
                self.db.clone().close().await,
                "failed to close database pool"
            )?;

            Ok::<(), SeaStorageError>(())
        })
        .await
        .map_err(Into::into)
    }
}
