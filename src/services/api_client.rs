use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::domains::task::{
    CreateTaskResponse, ErrorResponse, HealthResponse, MessageResponse, Task, TodoRequest,
};
use crate::error::{Result, TaskboardError};

/// Typed client for the task service's HTTP API.
#[derive(Clone)]
pub struct TaskClient {
    base_url: String,
    http: reqwest::Client,
}

impl TaskClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` bounds each whole request; `None` leaves requests unbounded.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TaskboardError::Http(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(join_url(&self.base_url, "health"))
            .send()
            .await
            .map_err(|e| TaskboardError::Http(e.to_string()))?;
        decode(response).await
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let response = self
            .http
            .get(join_url(&self.base_url, "/"))
            .send()
            .await
            .map_err(|e| TaskboardError::Http(e.to_string()))?;
        decode(response).await
    }

    pub async fn add_task(&self, todo: &str) -> Result<CreateTaskResponse> {
        let body = TodoRequest {
            todo: todo.to_string(),
        };
        let response = self
            .http
            .post(join_url(&self.base_url, "add-task"))
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskboardError::Http(e.to_string()))?;
        decode(response).await
    }

    pub async fn delete_task(&self, id: i32) -> Result<MessageResponse> {
        let response = self
            .http
            .delete(join_url(&self.base_url, &format!("delete-task/{id}")))
            .send()
            .await
            .map_err(|e| TaskboardError::Http(e.to_string()))?;
        decode(response).await
    }

    /// Sends the whole task; the service reads `todo` and takes the id from the path.
    pub async fn update_task(&self, task: &Task) -> Result<MessageResponse> {
        let response = self
            .http
            .put(join_url(&self.base_url, &format!("update-task/{}", task.id)))
            .json(task)
            .send()
            .await
            .map_err(|e| TaskboardError::Http(e.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| TaskboardError::Http(e.to_string()))?;
    if !status.is_success() {
        return Err(TaskboardError::Http(status_error(status, &text)));
    }
    serde_json::from_str(&text).map_err(|e| TaskboardError::Serialization(e.to_string()))
}

fn status_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => format!("{status}: {}", err.error),
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{status}: {}", body.trim()),
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
