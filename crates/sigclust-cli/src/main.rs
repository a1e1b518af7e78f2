//! Sigclust CLI - Command-line interface for signature-exposure clustering.

use clap::Parser;
use sigclust_cli::commands;
use sigclust_cli::{Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> sigclust_cli::Result<()> {
    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        Command::Cluster(args) => commands::execute_cluster(args, &formatter).await?,
        Command::Projects(args) => commands::execute_projects(args, &formatter).await?,
    }

    Ok(())
}
