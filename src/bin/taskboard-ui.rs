use clap::Parser;
use taskboard::config::DEFAULT_SERVER_URL;
use taskboard::error::Result;
use taskboard::services::api_client::TaskClient;
use taskboard::ui;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "taskboard-ui")]
#[command(about = "Taskboard desktop client")]
struct Cli {
    #[arg(long, env = "TASKBOARD_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taskboard=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    ui::launch_ui(TaskClient::new(cli.server)?);
    Ok(())
}
