//! HTTP request handlers for the gateway.
//!
//! Serves the GraphQL endpoint, its schema, and a health check using axum.

use crate::schema::{build_schema, HelloSchema};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router as AxumRouter,
};
use hello_bridge::{BridgeHandler, HelloService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared application state
pub struct AppState<C> {
    /// Bridge answering `hello`
    pub handler: Arc<BridgeHandler<C>>,
    /// GraphQL schema resolving through `handler`
    pub schema: HelloSchema,
    /// Upstream address, reported by the health check
    pub upstream: Arc<str>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            schema: self.schema.clone(),
            upstream: self.upstream.clone(),
        }
    }
}

impl<C: HelloService + 'static> AppState<C> {
    /// Create application state
    pub fn new(handler: Arc<BridgeHandler<C>>, upstream: impl Into<Arc<str>>) -> Self {
        Self {
            schema: build_schema(handler.clone()),
            handler,
            upstream: upstream.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// `ok` once the upstream binding exists, `uninitialized` before
    pub status: String,
    /// Configured upstream address
    pub upstream: String,
}

/// POST /query - Execute a GraphQL request
async fn query<C: HelloService + 'static>(
    State(state): State<AppState<C>>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    debug!("Executing query {:?}", request.query);
    Json(state.schema.execute(request).await)
}

/// GET /schema - Schema in SDL form
async fn schema_sdl<C: HelloService + 'static>(State(state): State<AppState<C>>) -> String {
    state.schema.sdl()
}

/// GET /health - Binding state
async fn health_check<C: HelloService + 'static>(
    State(state): State<AppState<C>>,
) -> Json<HealthCheckResponse> {
    let status = if state.handler.binding().is_bound() {
        "ok"
    } else {
        "uninitialized"
    };

    Json(HealthCheckResponse {
        status: status.to_string(),
        upstream: state.upstream.to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<C: HelloService + 'static>(state: AppState<C>) -> AxumRouter {
    AxumRouter::new()
        .route("/query", post(query::<C>))
        .route("/schema", get(schema_sdl::<C>))
        .route("/health", get(health_check::<C>))
        .with_state(state)
}
