#![warn(missing_docs)]

//! Hello gRPC contract
//!
//! Wire types and service definitions for the `hello` package, plus a
//! reference `SayHello` server used for local runs and tests.
//!
//! The gateway only ever calls one method on this service:
//! `hello.SayHello/SayHello`, `{name}` in, `{message}` out.

// Include generated protobuf code
pub mod proto {
    //! Generated protobuf types and service definitions
    tonic::include_proto!("hello");
}

pub mod server;

pub use proto::say_hello_client::SayHelloClient;
pub use proto::{HelloRequest, HelloResponse};
pub use server::{serve_with_listener, start_server, GreeterService, ServerConfig, ServerError};

/// Protobuf package the service is declared in
pub const PROTOCOL_NAMESPACE: &str = "hello";

/// Service name inside [`PROTOCOL_NAMESPACE`]
pub const SERVICE_NAME: &str = "SayHello";

/// The single unary method exposed by [`SERVICE_NAME`]
pub const METHOD_NAME: &str = "sayHello";

/// Port the reference server listens on by default
pub const DEFAULT_PORT: u16 = 9876;
