//! Hello Gateway
//!
//! Serves the GraphQL query `hello(name: String!): String!` over HTTP and
//! answers it through the gRPC bridge.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod schema;

use config::GatewayConfig;
use handlers::{create_router, AppState};
use hello_bridge::{BridgeError, BridgeHandler, GrpcBinding, GrpcClient};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Gateway error
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Upstream binding error
    #[error("Upstream error: {0}")]
    Bridge(#[from] BridgeError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Bind the upstream service and build the handler for `config`
///
/// Must run inside a Tokio runtime.
pub fn build_handler(
    config: &GatewayConfig,
) -> Result<BridgeHandler<GrpcClient>, GatewayError> {
    let binding = Arc::new(GrpcBinding::unbound());
    binding.bind_from(&config.upstream)?;

    let handler = BridgeHandler::new(binding);
    Ok(match config.deadline() {
        Some(deadline) => handler.with_deadline(deadline),
        None => handler,
    })
}

/// Start the gateway HTTP server
///
/// Binds the upstream before accepting connections, then serves until the
/// process exits.
pub async fn start_server(config: GatewayConfig) -> Result<(), GatewayError> {
    info!("Starting hello gateway");
    info!("Bind address: {}", config.bind_addr());
    info!("Upstream: {}", config.upstream.endpoint_uri());
    match config.deadline() {
        Some(deadline) => info!("Call deadline: {:?}", deadline),
        None => info!("Call deadline: none"),
    }

    let handler = Arc::new(build_handler(&config)?);
    let state = AppState::new(handler, config.upstream.address());
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Gateway listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| GatewayError::Server(e.to_string()))?;

    Ok(())
}
