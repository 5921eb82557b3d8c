mod close_impl;
pub(crate) mod entity;
pub(super) mod error;
mod todos_impl;

#[cfg(any(test, feature = "integration_tests"))]
pub mod test_util;

use std::time::Duration;

use crate::{
    config::{SqlConfig, StorageKind},
    trace_err,
};
use error::SeaStartupError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{info, info_span, instrument, Instrument};

pub(crate) struct SeaStorage {
    db: DatabaseConnection,
    kind: StorageKind,
}

impl SeaStorage {
    #[instrument(name = "SeaStorage::new", skip(sql_config), fields(max_connections = sql_config.max_connections))]
    pub async fn new(kind: StorageKind, sql_config: &SqlConfig) -> Result<Self, SeaStartupError> {
        let mut options = ConnectOptions::new(sql_config.url.clone());
        options
            .max_connections(sql_config.max_connections)
            .connect_timeout(Duration::from_secs(sql_config.connect_timeout_sec))
            .sqlx_logging(false);

        let db = Database::connect(options)
            .instrument(info_span!("sea_orm::connect"))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, backend = kind.as_ref(), "failed to connect to database");
                SeaStartupError::Connect(e)
            })?;

        Self::from_connection(db, kind).await
    }

    /// Wraps an open connection and makes sure the todos table exists.
    pub async fn from_connection(
        db: DatabaseConnection,
        kind: StorageKind,
    ) -> Result<Self, SeaStartupError> {
        let backend = db.get_database_backend();
        let mut create_table = Schema::new(backend).create_table_from_entity(entity::Entity);
        create_table.if_not_exists();

        trace_err!(
            db.execute(backend.build(&create_table))
                .instrument(info_span!("sea_orm::create_todos_table"))
                .await,
            "failed to create todos table"
        )
        .map_err(SeaStartupError::CreateSchema)?;

        info!(backend = kind.as_ref(), "storage is ready");

        Ok(Self { db, kind })
    }
}
