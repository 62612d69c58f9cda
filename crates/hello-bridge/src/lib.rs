//! Hello bridge
//!
//! Forwards the `hello(name)` query to the remote `hello.SayHello/SayHello`
//! gRPC method and maps the outcome back to a reply.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hello_bridge::{BridgeHandler, ConnectionDescriptor, GrpcBinding};
//!
//! # async fn example() -> Result<(), hello_bridge::BridgeError> {
//! let binding = Arc::new(GrpcBinding::unbound());
//! binding.bind_from(&ConnectionDescriptor::default())?;
//!
//! let handler = BridgeHandler::new(binding);
//! assert_eq!(handler.handle("World").await?, "Hello World");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod binding;
pub mod config;
pub mod contract;
pub mod error;
pub mod handler;
pub mod stream;

pub use binding::{connect, BindingState, GrpcBinding, GrpcClient, ServiceBinding};
pub use config::{ConnectionDescriptor, TransportKind, DEFAULT_PROTO_PATH};
pub use contract::{HelloService, Reply, ResponseStream};
pub use error::BridgeError;
pub use handler::{greeting, BridgeHandler};
pub use stream::{last_value, Collapse};
