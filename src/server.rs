use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::task::{CreateTaskResponse, ErrorResponse, HealthResponse, MessageResponse};
use crate::error::{Result, TaskboardError};
use crate::interfaces::repository::TaskRepository;
use crate::store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskRepository>,
}

#[derive(Deserialize)]
struct TodoBody {
    todo: Option<Value>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(list_tasks))
        .route("/health", get(health))
        .route("/add-task", post(add_task))
        .route("/delete-task/:id", delete(delete_task))
        .route("/update-task/:id", put(update_task))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for TaskboardError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            TaskboardError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            TaskboardError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn list_tasks(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "error fetching tasks");
            err.into_response()
        }
    }
}

async fn add_task(State(state): State<AppState>, body: Bytes) -> Response {
    let todo = match required_todo(&body) {
        Ok(todo) => todo,
        Err(err) => return err.into_response(),
    };

    match state.store.create(&todo).await {
        Ok(task) => {
            tracing::debug!(id = task.id, "task added");
            (
                StatusCode::CREATED,
                Json(CreateTaskResponse {
                    message: "Task added successfully".to_string(),
                    task,
                }),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "error adding task");
            err.into_response()
        }
    }
}

async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return TaskboardError::task_not_found().into_response();
    };

    match state.store.delete(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Task deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => TaskboardError::task_not_found().into_response(),
        Err(err) => {
            tracing::error!(error = %err, id, "error deleting task");
            err.into_response()
        }
    }
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let todo = match required_todo(&body) {
        Ok(todo) => todo,
        Err(err) => return err.into_response(),
    };
    let Some(id) = parse_id(&id) else {
        return TaskboardError::task_not_found().into_response();
    };

    // The stored row comes back from the statement, but only the message is returned;
    // clients refetch the list after an update.
    match state.store.update(id, &todo).await {
        Ok(Some(_)) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Task updated successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(None) => TaskboardError::task_not_found().into_response(),
        Err(err) => {
            tracing::error!(error = %err, id, "error updating task");
            err.into_response()
        }
    }
}

/// Extracts a non-empty string `todo`. Malformed bodies count as a missing value.
fn required_todo(body: &[u8]) -> Result<String> {
    let todo = serde_json::from_slice::<TodoBody>(body)
        .ok()
        .and_then(|body| body.todo);
    match todo {
        Some(Value::String(todo)) if !todo.is_empty() => Ok(todo),
        _ => Err(TaskboardError::todo_required()),
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}

pub async fn run(config: &Config) -> Result<()> {
    run_with_shutdown(config, shutdown_signal()).await
}

pub async fn run_with_shutdown<F>(config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = store::open(&config.database).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TaskboardError::Runtime(e.to_string()))?;
    tracing::info!("Server is listening on port {}", config.server.port);

    serve(listener, AppState { store }, shutdown).await
}

pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| TaskboardError::Runtime(e.to_string()))?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        futures::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
