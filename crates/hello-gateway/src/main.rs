//! Hello Gateway CLI
//!
//! Starts the HTTP query surface in front of the SayHello gRPC service.

use clap::Parser;
use hello_gateway::{config::GatewayConfig, start_server, GatewayError};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Serve `hello(name)` over HTTP, backed by SayHello over gRPC
#[derive(Debug, Parser)]
#[command(name = "hello-gateway", version, about)]
struct Cli {
    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(long, value_name = "PORT")]
    bind_port: Option<u16>,

    /// Override the upstream address
    #[arg(long, value_name = "HOST:PORT")]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), GatewayError> {
    let mut config = match cli.config {
        Some(path) => GatewayConfig::from_file(path)?,
        None => {
            tracing::warn!("No config file specified, using defaults");
            GatewayConfig::default()
        }
    };

    if let Some(port) = cli.bind_port {
        config.bind_port = port;
    }
    if let Some(address) = cli.upstream {
        config.upstream = config.upstream.with_address(address);
    }

    start_server(config).await
}
