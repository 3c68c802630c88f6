use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, TaskboardError>;

impl TaskboardError {
    pub fn todo_required() -> Self {
        Self::Validation("Todo is required".to_string())
    }

    pub fn task_not_found() -> Self {
        Self::NotFound("Task not found".to_string())
    }
}
