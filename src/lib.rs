pub mod board;
pub mod config;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod providers;
pub mod server;
pub mod services;
pub mod store;
#[cfg(feature = "ui")]
pub mod ui;

pub use crate::board::{BoardState, TaskBoard};
pub use crate::config::Config;
pub use crate::domains::task::Task;
pub use crate::error::{Result, TaskboardError};
pub use crate::services::api_client::TaskClient;
