//! Error types for the bridge.

use thiserror::Error;
use tonic::Status;

use crate::stream::Collapse;

/// Bridge operation errors
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Handler invoked before the service binding was established
    #[error("Service binding not established")]
    Uninitialized,

    /// The binding was asked to transition a second time
    #[error("Service binding already established")]
    AlreadyBound,

    /// The remote call completed without producing a response
    #[error("Remote call completed without a response")]
    EmptyResponse,

    /// Channel or remote call failure, passed through unmodified
    #[error("Remote call failed: {0}")]
    TransportFailure(#[from] Status),

    /// The configured address is not a usable endpoint URI
    #[error("Invalid service address {address}: {source}")]
    InvalidAddress {
        /// Endpoint URI built from the descriptor
        address: String,
        /// Underlying parse error
        #[source]
        source: tonic::transport::Error,
    },

    /// The descriptor names a package this build was not compiled against
    #[error("Protocol namespace mismatch: expected {expected}, found {found}")]
    NamespaceMismatch {
        /// Package compiled into the client
        expected: String,
        /// Package named by the descriptor
        found: String,
    },
}

impl BridgeError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::Uninitialized => "UNINITIALIZED",
            BridgeError::AlreadyBound => "ALREADY_BOUND",
            BridgeError::EmptyResponse => "EMPTY_RESPONSE",
            BridgeError::TransportFailure(_) => "TRANSPORT_FAILURE",
            BridgeError::InvalidAddress { .. } => "INVALID_ADDRESS",
            BridgeError::NamespaceMismatch { .. } => "NAMESPACE_MISMATCH",
        }
    }
}

impl From<Collapse<Status>> for BridgeError {
    fn from(collapse: Collapse<Status>) -> Self {
        match collapse {
            Collapse::Empty => BridgeError::EmptyResponse,
            Collapse::Failed(status) => BridgeError::TransportFailure(status),
        }
    }
}
