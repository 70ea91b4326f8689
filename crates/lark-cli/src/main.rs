use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

mod commands;
mod configuration;

use commands::run::RunArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one input to an agent and print the reply
    Run(RunArgs),

    /// List supported model vendors and the variables they need
    Vendors,

    /// Print the CLI version
    Version,
}

fn init_logging() {
    // Logs go to stderr so streamed replies on stdout stay clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = dotenv();
    init_logging();
    if let Ok(path) = loaded {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => commands::run::execute(args).await,
        Command::Vendors => commands::vendors::execute(),
        Command::Version => commands::version::execute(),
    }
}
