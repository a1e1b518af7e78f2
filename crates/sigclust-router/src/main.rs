//! Sigclust Router CLI
//!
//! Starts the Router HTTP server for sample clustering.

use sigclust_router::{config::RouterConfig, start_server, RouterError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), RouterError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        RouterConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: sigclust-router --config <path-to-config.toml>");
        eprintln!();
        RouterConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Sigclust Router - Mutational signature clustering service");
    println!();
    println!("USAGE:");
    println!("    sigclust-router --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - data_dir: Directory with meta.tsv and count files");
    println!("    - exposures_path: Precomputed exposure table (TSV)");
    println!("    - [engine]: request_timeout_secs, max_samples, warn_on_duplicates");
    println!();
    println!("ENVIRONMENT:");
    println!("    SIGCLUST_DATA_DIR  Overrides data_dir");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
