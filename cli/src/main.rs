//! collector-installer - installs the OpenTelemetry Collector as a systemd service

use clap::Parser;
use tracing_subscriber::EnvFilter;

use collector_installer::cli::{self, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = cli.run().await {
        match cli::error_json(&e) {
            Ok(doc) if json => println!("{doc}"),
            _ => eprintln!("Error: {}", cli::error_message(&e)),
        }
        std::process::exit(1);
    }
}
