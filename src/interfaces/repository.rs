use async_trait::async_trait;

use crate::domains::task::Task;
use crate::error::Result;

/// Storage seam for the task table. Each method maps to exactly one SQL statement.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, ascending by id.
    async fn list(&self) -> Result<Vec<Task>>;

    async fn create(&self, todo: &str) -> Result<Task>;

    /// Overwrites the text of `id`. `None` when no row matched.
    async fn update(&self, id: i32, todo: &str) -> Result<Option<Task>>;

    /// `false` when no row matched.
    async fn delete(&self, id: i32) -> Result<bool>;
}
