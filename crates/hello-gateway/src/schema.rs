//! GraphQL query surface
//!
//! The schema has one root field, `hello(name: String!): String!`, resolved by
//! the bridge. Operations are mapped by the typed [`QueryRoot`] resolver, not
//! by inspecting anything at runtime.

use async_graphql::{EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema};
use futures::future::BoxFuture;
use hello_bridge::{BridgeError, BridgeHandler, HelloService};
use std::sync::Arc;

/// Schema served by the gateway
pub type HelloSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

type HelloFn = Arc<dyn Fn(String) -> BoxFuture<'static, Result<String, BridgeError>> + Send + Sync>;

/// Root query type
pub struct QueryRoot {
    hello: HelloFn,
}

impl QueryRoot {
    /// Resolve `hello` through `handler`
    pub fn new<C: HelloService + 'static>(handler: Arc<BridgeHandler<C>>) -> Self {
        let hello: HelloFn = Arc::new(
            move |name: String| -> BoxFuture<'static, Result<String, BridgeError>> {
                let handler = handler.clone();
                Box::pin(async move { handler.handle(&name).await })
            },
        );

        Self { hello }
    }
}

#[Object(name = "Query")]
impl QueryRoot {
    /// Greets `name` once the upstream SayHello call has succeeded
    async fn hello(&self, name: String) -> async_graphql::Result<String> {
        (self.hello)(name).await.map_err(|e| to_graphql_error(&e))
    }
}

/// Build the schema around `handler`
pub fn build_schema<C: HelloService + 'static>(handler: Arc<BridgeHandler<C>>) -> HelloSchema {
    Schema::build(QueryRoot::new(handler), EmptyMutation, EmptySubscription).finish()
}

/// GraphQL error carrying the bridge error code under `extensions.code`
pub fn to_graphql_error(error: &BridgeError) -> async_graphql::Error {
    let code = error.code();
    async_graphql::Error::new(error.to_string()).extend_with(|_, e| e.set("code", code))
}
