use std::time::Duration;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use taskboard::config::DEFAULT_SERVER_URL;
use taskboard::error::Result;
use taskboard::services::api_client::TaskClient;
use taskboard::Task;

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "Taskboard command-line client")]
struct Cli {
    #[arg(long, env = "TASKBOARD_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Per-request timeout; requests wait indefinitely when unset.
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show every task (the default).
    List,
    Add {
        todo: String,
    },
    Update {
        id: i32,
        todo: String,
    },
    Delete {
        id: i32,
    },
    /// Check that the service is reachable.
    Status,
    /// Open the desktop board.
    #[cfg(feature = "ui")]
    Ui,
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", style("No tasks yet.").color256(245));
        return;
    }
    let width = tasks
        .iter()
        .map(|task| task.id.to_string().len())
        .max()
        .unwrap_or(1);
    for task in tasks {
        println!(
            "{} {}",
            style(format!("{:>width$}", task.id)).color256(81).bold(),
            task.todo
        );
    }
}

fn print_message(message: &str) {
    println!("{}", style(message).green());
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taskboard=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let client = TaskClient::with_timeout(
        cli.server.clone(),
        cli.timeout_secs.map(Duration::from_secs),
    )?;
    let command = cli.command.unwrap_or(Commands::List);

    // The desktop event loop owns the main thread and brings its own runtime.
    #[cfg(feature = "ui")]
    if matches!(command, Commands::Ui) {
        taskboard::ui::launch_ui(client);
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| taskboard::TaskboardError::Runtime(e.to_string()))?;
    if let Err(err) = runtime.block_on(run_command(&client, command)) {
        eprintln!("{}", style(err).red());
        std::process::exit(1);
    }
    Ok(())
}

async fn run_command(client: &TaskClient, command: Commands) -> Result<()> {
    match command {
        Commands::List => {
            let tasks = client.list_tasks().await?;
            print_tasks(&tasks);
        }
        Commands::Add { todo } => {
            if todo.trim().is_empty() {
                eprintln!("{}", style("Nothing to add.").color256(245));
                return Ok(());
            }
            let created = client.add_task(&todo).await?;
            print_message(&created.message);
            print_tasks(&[created.task]);
        }
        Commands::Update { id, todo } => {
            let response = client.update_task(&Task { id, todo }).await?;
            print_message(&response.message);
            print_tasks(&client.list_tasks().await?);
        }
        Commands::Delete { id } => {
            let response = client.delete_task(id).await?;
            print_message(&response.message);
            print_tasks(&client.list_tasks().await?);
        }
        Commands::Status => {
            let health = client.health().await?;
            println!("{} {}", style(client.base_url()).color256(81), health.status);
        }
        #[cfg(feature = "ui")]
        Commands::Ui => {}
    }
    Ok(())
}
