use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TaskboardError};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SQLITE_PATH: &str = "./data/taskboard.db";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostgresConfig {
    pub host: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub port: Option<u16>,
}

impl PostgresConfig {
    pub fn database_url(&self) -> String {
        let credentials = match (&self.user, &self.password) {
            (Some(user), Some(password)) => format!(
                "{}:{}@",
                urlencoding::encode(user),
                urlencoding::encode(password)
            ),
            (Some(user), None) => format!("{}@", urlencoding::encode(user)),
            _ => String::new(),
        };
        let name = self.name.as_deref().unwrap_or("postgres");
        let port = self.port.unwrap_or(DEFAULT_PG_PORT);
        format!("postgres://{credentials}{}:{port}/{name}", self.host)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum DatabaseConfig {
    Postgres(PostgresConfig),
    Sqlite { path: String },
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: DEFAULT_SQLITE_PATH.to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Connection target with the password masked, for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Postgres(pg) => {
                let masked = PostgresConfig {
                    password: pg.password.as_ref().map(|_| "***".to_string()),
                    ..pg.clone()
                };
                masked.database_url()
            }
            Self::Sqlite { path } => format!("sqlite://{path}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// Values collected from flags or the environment, layered over a loaded [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db_host: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    pub db_port: Option<u16>,
    pub sqlite_path: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| TaskboardError::Config(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| TaskboardError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host.filter(|v| !v.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }

        let db_host = overrides.db_host.filter(|v| !v.trim().is_empty());
        let touches_postgres = db_host.is_some()
            || overrides.db_user.is_some()
            || overrides.db_password.is_some()
            || overrides.db_name.is_some()
            || overrides.db_port.is_some();

        self.database = match (self.database, db_host) {
            (DatabaseConfig::Postgres(mut pg), host) if touches_postgres => {
                if let Some(host) = host {
                    pg.host = host;
                }
                pg.user = overrides.db_user.or(pg.user);
                pg.password = overrides.db_password.or(pg.password);
                pg.name = overrides.db_name.or(pg.name);
                pg.port = overrides.db_port.or(pg.port);
                DatabaseConfig::Postgres(pg)
            }
            (_, Some(host)) => DatabaseConfig::Postgres(PostgresConfig {
                host,
                user: overrides.db_user,
                password: overrides.db_password,
                name: overrides.db_name,
                port: overrides.db_port,
            }),
            (database, None) => match overrides.sqlite_path {
                Some(path) if !matches!(database, DatabaseConfig::Postgres(_)) => {
                    DatabaseConfig::Sqlite { path }
                }
                _ => database,
            },
        };
        self
    }
}
