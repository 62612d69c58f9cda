//! Reference `SayHello` server
//!
//! Answers every request with `"Hello " + name`. The gateway does not depend
//! on this implementation; it exists so the bridge can be exercised end to end.

use std::future::Future;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use tracing::{debug, info};

use crate::proto::say_hello_server::{SayHello, SayHelloServer};
use crate::proto::{HelloRequest, HelloResponse};
use crate::DEFAULT_PORT;

/// Server startup and serving errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured listen address does not parse as `host:port`
    #[error("Invalid listen address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    /// gRPC transport failure while serving
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// Listener I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server listen address
    pub addr: String,

    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
        }
    }

    /// Get the full server address
    pub fn full_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

/// Greets whoever it is asked about
#[derive(Debug, Default, Clone)]
pub struct GreeterService;

#[tonic::async_trait]
impl SayHello for GreeterService {
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloResponse>, Status> {
        let req = request.into_inner();
        debug!(name = %req.name, "SayHello received");

        Ok(Response::new(HelloResponse {
            message: format!("Hello {}", req.name),
        }))
    }
}

/// Start the reference server and serve until the process exits
///
/// # Errors
/// Returns error if the address is invalid or the server fails to bind
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = config.full_address().parse()?;

    info!("SayHello server starting on {}", addr);

    Server::builder()
        .add_service(SayHelloServer::new(GreeterService))
        .serve(addr)
        .await?;

    Ok(())
}

/// Serve on an already-bound listener until `shutdown` resolves
pub async fn serve_with_listener<F>(listener: TcpListener, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send,
{
    let addr = listener.local_addr()?;
    info!("SayHello server listening on {}", addr);

    Server::builder()
        .add_service(SayHelloServer::new(GreeterService))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    info!("SayHello server on {} stopped", addr);
    Ok(())
}
