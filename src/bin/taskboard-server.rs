use clap::Parser;
use taskboard::config::{Config, ConfigOverrides};
use taskboard::error::Result;
use taskboard::server;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "taskboard-server")]
#[command(about = "Taskboard HTTP task service")]
struct Cli {
    /// JSON config file; flags and environment take precedence over it.
    #[arg(long)]
    config: Option<String>,

    #[arg(long, env = "TASKBOARD_HOST")]
    host: Option<String>,

    #[arg(long, env = "TASKBOARD_PORT")]
    port: Option<u16>,

    #[arg(long, env = "DB_HOST")]
    db_host: Option<String>,

    #[arg(long, env = "DB_USER")]
    db_user: Option<String>,

    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    db_password: Option<String>,

    #[arg(long, env = "DB_NAME")]
    db_name: Option<String>,

    #[arg(long, env = "DB_PORT")]
    db_port: Option<u16>,

    /// SQLite database used when no database host is configured [default: ./data/taskboard.db]
    #[arg(long, env = "TASKBOARD_SQLITE")]
    sqlite: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taskboard=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let base = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let config = base.with_overrides(ConfigOverrides {
        host: cli.host,
        port: cli.port,
        db_host: cli.db_host,
        db_user: cli.db_user,
        db_password: cli.db_password,
        db_name: cli.db_name,
        db_port: cli.db_port,
        sqlite_path: cli.sqlite,
    });

    server::run(&config).await
}
