use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::interfaces::repository::TaskRepository;
use crate::providers::postgres::PostgresTaskStore;
use crate::providers::sqlite::SqliteTaskStore;

/// Opens the configured backend and brings its schema up to date.
pub async fn open(config: &DatabaseConfig) -> Result<Arc<dyn TaskRepository>> {
    tracing::info!(database = %config.describe(), "opening task store");
    let store: Arc<dyn TaskRepository> = match config {
        DatabaseConfig::Postgres(pg) => Arc::new(PostgresTaskStore::new(pg.database_url()).await?),
        DatabaseConfig::Sqlite { path } => Arc::new(SqliteTaskStore::new(path).await?),
    };
    Ok(store)
}
