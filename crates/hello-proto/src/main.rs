//! Reference SayHello server
//!
//! Listens on `0.0.0.0:9876` unless a port is given as the first argument.

use hello_proto::{start_server, ServerConfig, DEFAULT_PORT};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = match env::args().nth(1) {
        Some(arg) => match arg.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                eprintln!("Usage: hello-server [port]");
                process::exit(2);
            }
        },
        None => DEFAULT_PORT,
    };

    let config = ServerConfig {
        port,
        ..Default::default()
    };

    if let Err(e) = start_server(config).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
