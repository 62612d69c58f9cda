//! The `hello` query entry point.

use std::sync::Arc;
use std::time::Duration;

use hello_proto::{HelloRequest, HelloResponse, METHOD_NAME, PROTOCOL_NAMESPACE, SERVICE_NAME};
use tokio::time::timeout;
use tonic::Status;
use tracing::{debug, info, warn};

use crate::binding::ServiceBinding;
use crate::contract::HelloService;
use crate::error::BridgeError;
use crate::stream::last_value;

/// Reply returned for `name` once the remote call has succeeded
pub fn greeting(name: &str) -> String {
    format!("Hello {}", name)
}

/// Forwards `hello(name)` to the remote service
pub struct BridgeHandler<C> {
    binding: Arc<ServiceBinding<C>>,
    deadline: Option<Duration>,
}

impl<C: HelloService> BridgeHandler<C> {
    /// Create a handler reading from `binding`
    ///
    /// Outbound calls are not bounded in time until [`with_deadline`](Self::with_deadline)
    /// is applied.
    pub fn new(binding: Arc<ServiceBinding<C>>) -> Self {
        Self {
            binding,
            deadline: None,
        }
    }

    /// Bound every outbound call by `deadline`
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Binding this handler reads from
    pub fn binding(&self) -> &ServiceBinding<C> {
        &self.binding
    }

    /// Configured call deadline
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Answer `hello(name)`
    ///
    /// The remote response is only logged. The reply is always
    /// [`greeting`]`(name)`, whatever the remote side sent back.
    ///
    /// # Errors
    /// - [`BridgeError::Uninitialized`] before the binding is established
    /// - [`BridgeError::EmptyResponse`] if the call yields no response
    /// - [`BridgeError::TransportFailure`] for any channel or call failure
    pub async fn handle(&self, name: &str) -> Result<String, BridgeError> {
        let service = self.binding.get()?;

        match self.forward(service, name).await {
            Ok(response) => {
                info!(
                    name = %name,
                    remote_message = %response.message,
                    "{} response received",
                    METHOD_NAME
                );
                Ok(greeting(name))
            }
            Err(e) => {
                warn!(name = %name, code = e.code(), "{} failed: {}", METHOD_NAME, e);
                Err(e)
            }
        }
    }

    async fn forward(&self, service: &C, name: &str) -> Result<HelloResponse, BridgeError> {
        let request = HelloRequest {
            name: name.to_string(),
        };
        debug!(
            "Calling {}.{}/{} with {:?}",
            PROTOCOL_NAMESPACE, SERVICE_NAME, METHOD_NAME, request
        );

        let call = async {
            let responses = service.say_hello(request).await?;
            last_value(responses).await.map_err(BridgeError::from)
        };

        match self.deadline {
            Some(deadline) => match timeout(deadline, call).await {
                Ok(result) => result,
                Err(_) => Err(BridgeError::TransportFailure(Status::deadline_exceeded(
                    format!("no response within {:?}", deadline),
                ))),
            },
            None => call.await,
        }
    }
}
