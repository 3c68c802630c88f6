use std::path::Path;

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::ConnectionError;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, RunQueryDsl, SimpleAsyncConnection};
use futures::future::BoxFuture;
use futures::FutureExt;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::schema::tasks;
use super::{map_row, NewTask, TaskRow};
use crate::domains::task::Task;
use crate::error::{Result, TaskboardError};
use crate::interfaces::repository::TaskRepository;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/sqlite");

/// Writers wait on each other instead of failing with `database is locked`.
const CONNECTION_PRAGMAS: &str = "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;";

type SqliteAsyncConn = SyncConnectionWrapper<SqliteConnection>;
type SqlitePool = Pool<SqliteAsyncConn>;
type SqlitePooledConn<'a> = PooledConnection<'a, SqliteAsyncConn>;

pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    pub async fn new(sqlite_path: impl AsRef<str>) -> Result<Self> {
        let sqlite_path = sqlite_path.as_ref();
        ensure_parent_dir(sqlite_path)?;
        run_migrations(sqlite_path).await?;

        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(establish_connection);
        let manager = AsyncDieselConnectionManager::<SqliteAsyncConn>::new_with_config(
            sqlite_path,
            manager_config,
        );
        let pool: SqlitePool = Pool::builder()
            .build(manager)
            .await
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<SqlitePooledConn<'_>> {
        self.pool
            .get()
            .await
            .map_err(|e| TaskboardError::Storage(e.to_string()))
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        let mut conn = self.conn().await?;
        let rows: Vec<TaskRow> = tasks::table
            .order(tasks::id.asc())
            .load(&mut conn)
            .await
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok(rows.into_iter().map(map_row).collect())
    }

    async fn create(&self, todo: &str) -> Result<Task> {
        let mut conn = self.conn().await?;
        let row: TaskRow = diesel::insert_into(tasks::table)
            .values(&NewTask { todo })
            .get_result(&mut conn)
            .await
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok(map_row(row))
    }

    async fn update(&self, id: i32, todo: &str) -> Result<Option<Task>> {
        let mut conn = self.conn().await?;
        let row: Option<TaskRow> = diesel::update(tasks::table.find(id))
            .set(tasks::todo.eq(todo))
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok(row.map(map_row))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut conn = self.conn().await?;
        let count = diesel::delete(tasks::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok(count > 0)
    }
}

fn establish_connection(database_url: &str) -> BoxFuture<'_, ConnectionResult<SqliteAsyncConn>> {
    async move {
        let mut conn = SqliteAsyncConn::establish(database_url).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TaskboardError::Storage(e.to_string()))?;
    }
    Ok(())
}

async fn run_migrations(database_url: &str) -> Result<()> {
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&database_url)
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok::<_, TaskboardError>(())
    })
    .await
    .map_err(|e| TaskboardError::Runtime(e.to_string()))??;
    Ok(())
}
