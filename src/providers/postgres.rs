use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::schema::tasks;
use super::{map_row, NewTask, TaskRow};
use crate::domains::task::Task;
use crate::error::{Result, TaskboardError};
use crate::interfaces::repository::TaskRepository;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/postgres");

type PgPool = Pool<AsyncPgConnection>;
type PgPooledConn<'a> = PooledConnection<'a, AsyncPgConnection>;

pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    pub async fn new(database_url: impl AsRef<str>) -> Result<Self> {
        let database_url = database_url.as_ref();
        run_migrations(database_url).await?;

        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool: PgPool = Pool::builder()
            .build(manager)
            .await
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<PgPooledConn<'_>> {
        self.pool
            .get()
            .await
            .map_err(|e| TaskboardError::Storage(e.to_string()))
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskStore {
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

// The migration harness is synchronous; it drives the async connection on its own
// runtime, so it must stay off the server's worker threads.
async fn run_migrations(database_url: &str) -> Result<()> {
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| TaskboardError::Storage(e.to_string()))?;
        Ok::<_, TaskboardError>(())
    })
    .await
    .map_err(|e| TaskboardError::Runtime(e.to_string()))??;
    Ok(())
}
