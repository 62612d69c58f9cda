//! Service binding lifecycle
//!
//! A binding starts `Unbound` and moves to `Bound` exactly once. It is written
//! during startup and read without locking by every request afterwards.

use std::fmt;

use hello_proto::{SayHelloClient, PROTOCOL_NAMESPACE, SERVICE_NAME};
use tokio::sync::OnceCell;
use tonic::transport::{Channel, Endpoint};
use tracing::info;

use crate::config::ConnectionDescriptor;
use crate::error::BridgeError;

/// Generated `SayHello` client over a tonic channel
pub type GrpcClient = SayHelloClient<Channel>;

/// Binding to the generated gRPC client
pub type GrpcBinding = ServiceBinding<GrpcClient>;

/// Observable binding state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// No handle yet; requests fail with [`BridgeError::Uninitialized`]
    Unbound,
    /// Handle resolved for the rest of the process lifetime
    Bound,
}

/// Once-written handle to the remote service
pub struct ServiceBinding<C> {
    handle: OnceCell<C>,
}

impl<C> ServiceBinding<C> {
    /// Binding awaiting its initialization hook
    pub fn unbound() -> Self {
        Self {
            handle: OnceCell::new(),
        }
    }

    /// Binding constructed with an already-resolved handle
    pub fn bound(handle: C) -> Self {
        Self {
            handle: OnceCell::new_with(Some(handle)),
        }
    }

    /// Perform the `Unbound` → `Bound` transition
    ///
    /// # Errors
    /// [`BridgeError::AlreadyBound`] if a handle is already present; the
    /// existing handle is kept.
    pub fn bind(&self, handle: C) -> Result<(), BridgeError> {
        self.handle
            .set(handle)
            .map_err(|_| BridgeError::AlreadyBound)
    }

    /// The bound handle
    ///
    /// # Errors
    /// [`BridgeError::Uninitialized`] while unbound.
    pub fn get(&self) -> Result<&C, BridgeError> {
        self.handle.get().ok_or(BridgeError::Uninitialized)
    }

    /// Current state
    pub fn state(&self) -> BindingState {
        if self.handle.initialized() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    /// Whether the transition has happened
    pub fn is_bound(&self) -> bool {
        self.state() == BindingState::Bound
    }
}

impl<C> Default for ServiceBinding<C> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<C> fmt::Debug for ServiceBinding<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBinding")
            .field("state", &self.state())
            .finish()
    }
}

impl GrpcBinding {
    /// Initialization hook: build the channel from `descriptor` and bind it
    ///
    /// Must run inside a Tokio runtime.
    pub fn bind_from(&self, descriptor: &ConnectionDescriptor) -> Result<(), BridgeError> {
        if self.is_bound() {
            return Err(BridgeError::AlreadyBound);
        }
        self.bind(connect(descriptor)?)
    }
}

/// Resolve a `SayHello` client for `descriptor`
///
/// The channel connects lazily; an unreachable address is reported by the
/// first call, not here. Must run inside a Tokio runtime.
pub fn connect(descriptor: &ConnectionDescriptor) -> Result<GrpcClient, BridgeError> {
    if descriptor.package() != PROTOCOL_NAMESPACE {
        return Err(BridgeError::NamespaceMismatch {
            expected: PROTOCOL_NAMESPACE.to_string(),
            found: descriptor.package().to_string(),
        });
    }

    let uri = descriptor.endpoint_uri();
    let endpoint = Endpoint::from_shared(uri.clone()).map_err(|source| {
        BridgeError::InvalidAddress {
            address: uri.clone(),
            source,
        }
    })?;

    info!(
        endpoint = %uri,
        proto = %descriptor.resolved_proto_path().display(),
        "Binding {}.{}",
        PROTOCOL_NAMESPACE,
        SERVICE_NAME
    );

    Ok(SayHelloClient::new(endpoint.connect_lazy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_reports_uninitialized() {
        let binding: ServiceBinding<u32> = ServiceBinding::unbound();
        assert_eq!(binding.state(), BindingState::Unbound);
        assert!(matches!(binding.get(), Err(BridgeError::Uninitialized)));
    }

    #[test]
    fn test_bind_transitions_once() {
        let binding = ServiceBinding::unbound();
        binding.bind(1u32).unwrap();
        assert!(binding.is_bound());
        assert_eq!(*binding.get().unwrap(), 1);

        assert!(matches!(binding.bind(2), Err(BridgeError::AlreadyBound)));
        assert_eq!(*binding.get().unwrap(), 1);
    }

    #[test]
    fn test_bound_constructor() {
        let binding = ServiceBinding::bound("handle");
        assert_eq!(binding.state(), BindingState::Bound);
        assert_eq!(*binding.get().unwrap(), "handle");
    }

    #[test]
    fn test_debug_shows_state_only() {
        let binding = ServiceBinding::bound(7u8);
        assert_eq!(format!("{:?}", binding), "ServiceBinding { state: Bound }");
    }

    #[tokio::test]
    async fn test_connect_rejects_foreign_namespace() {
        let descriptor = ConnectionDescriptor::new("localhost:9876", "greeter.v2", "proto/hello.proto");
        let result = connect(&descriptor);
        match result {
            Err(BridgeError::NamespaceMismatch { expected, found }) => {
                assert_eq!(expected, "hello");
                assert_eq!(found, "greeter.v2");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_address() {
        let descriptor = ConnectionDescriptor::for_address("not a host:9876");
        assert!(matches!(
            connect(&descriptor),
            Err(BridgeError::InvalidAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_bind_from_is_lazy_and_single_shot() {
        let binding = GrpcBinding::unbound();
        let descriptor = ConnectionDescriptor::for_address("127.0.0.1:1");

        // Nothing listens there; binding still succeeds because the channel is lazy.
        binding.bind_from(&descriptor).unwrap();
        assert!(binding.is_bound());

        assert!(matches!(
            binding.bind_from(&descriptor),
            Err(BridgeError::AlreadyBound)
        ));
    }
}
