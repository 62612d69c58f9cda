//! Capability required of the remote side.
//!
//! One operation, `sayHello`. A serving implementation may answer
//! immediately, with a deferred value, or with a stream; [`Reply`] captures
//! all three and normalizes them into a [`ResponseStream`], which is the only
//! shape the bridge consumes.

use futures::future::BoxFuture;
use futures::stream::{self, BoxStream, StreamExt};
use hello_proto::{HelloRequest, HelloResponse, SayHelloClient};
use tonic::transport::Channel;
use tonic::Status;

/// Responses of one call, in emission order
pub type ResponseStream = BoxStream<'static, Result<HelloResponse, Status>>;

/// The remote greeting operation
#[tonic::async_trait]
pub trait HelloService: Send + Sync {
    /// Issue `sayHello` for `request`
    async fn say_hello(&self, request: HelloRequest) -> Result<ResponseStream, Status>;
}

/// Serving-side return shapes of `sayHello`
pub enum Reply {
    /// Value available synchronously
    Immediate(HelloResponse),
    /// Value resolved later
    Deferred(BoxFuture<'static, Result<HelloResponse, Status>>),
    /// Zero or more values pushed over time
    Streamed(ResponseStream),
}

impl Reply {
    /// Normalize into a stream
    pub fn into_stream(self) -> ResponseStream {
        match self {
            Reply::Immediate(response) => stream::once(async move { Ok(response) }).boxed(),
            Reply::Deferred(future) => stream::once(future).boxed(),
            Reply::Streamed(responses) => responses,
        }
    }
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Immediate(response) => f.debug_tuple("Immediate").field(response).finish(),
            Reply::Deferred(_) => f.write_str("Deferred(..)"),
            Reply::Streamed(_) => f.write_str("Streamed(..)"),
        }
    }
}

#[tonic::async_trait]
impl HelloService for SayHelloClient<Channel> {
    async fn say_hello(&self, request: HelloRequest) -> Result<ResponseStream, Status> {
        // Clones share the underlying channel.
        let mut client = self.clone();
        // Type path picks the generated inherent method, not this trait method.
        let response = SayHelloClient::<Channel>::say_hello(&mut client, request).await?;
        Ok(Reply::Immediate(response.into_inner()).into_stream())
    }
}
