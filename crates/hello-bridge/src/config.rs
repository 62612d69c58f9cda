//! Connection settings for the remote greeting service.
//!
//! A [`ConnectionDescriptor`] is resolved once at startup and shared
//! read-only afterwards. Nothing here is validated; a bad address surfaces
//! when the binding is established.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use hello_proto::{DEFAULT_PORT, PROTOCOL_NAMESPACE};

/// Default schema location, relative to the workspace root where the
/// binaries are run from
pub const DEFAULT_PROTO_PATH: &str = "crates/hello-proto/proto/hello.proto";

/// Transport used to reach the remote service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// gRPC over plaintext HTTP/2
    #[default]
    Grpc,
}

impl TransportKind {
    /// URI scheme for endpoints of this transport
    pub fn scheme(&self) -> &'static str {
        match self {
            TransportKind::Grpc => "http",
        }
    }
}

/// Where and how to reach the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionDescriptor {
    transport: TransportKind,
    address: String,
    package: String,
    proto_path: PathBuf,
}

impl Default for ConnectionDescriptor {
    fn default() -> Self {
        Self {
            transport: TransportKind::Grpc,
            address: format!("localhost:{}", DEFAULT_PORT),
            package: PROTOCOL_NAMESPACE.to_string(),
            proto_path: PathBuf::from(DEFAULT_PROTO_PATH),
        }
    }
}

impl ConnectionDescriptor {
    /// Create a gRPC descriptor
    pub fn new(
        address: impl Into<String>,
        package: impl Into<String>,
        proto_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transport: TransportKind::Grpc,
            address: address.into(),
            package: package.into(),
            proto_path: proto_path.into(),
        }
    }

    /// Default descriptor pointed at another address
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Same descriptor pointed at another address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Transport kind
    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    /// Network address as configured (`host:port` or a full URI)
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Protocol namespace (protobuf package) of the service
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Interface definition location as configured
    pub fn proto_path(&self) -> &Path {
        &self.proto_path
    }

    /// Endpoint URI for the channel
    ///
    /// Bare `host:port` addresses get the transport's scheme prepended.
    pub fn endpoint_uri(&self) -> String {
        if self.address.contains("://") {
            self.address.clone()
        } else {
            format!("{}://{}", self.transport.scheme(), self.address)
        }
    }

    /// Interface definition location resolved against the working directory
    pub fn resolved_proto_path(&self) -> PathBuf {
        if self.proto_path.is_absolute() {
            return self.proto_path.clone();
        }

        std::env::current_dir()
            .map(|cwd| cwd.join(&self.proto_path))
            .unwrap_or_else(|_| self.proto_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor() {
        let descriptor = ConnectionDescriptor::default();
        assert_eq!(descriptor.transport(), TransportKind::Grpc);
        assert_eq!(descriptor.address(), "localhost:9876");
        assert_eq!(descriptor.package(), "hello");
        assert_eq!(descriptor.proto_path(), Path::new(DEFAULT_PROTO_PATH));
    }

    #[test]
    fn test_endpoint_uri_adds_scheme() {
        let descriptor = ConnectionDescriptor::for_address("10.0.0.5:50051");
        assert_eq!(descriptor.endpoint_uri(), "http://10.0.0.5:50051");
    }

    #[test]
    fn test_endpoint_uri_keeps_existing_scheme() {
        let descriptor = ConnectionDescriptor::for_address("http://greeter.internal:9876");
        assert_eq!(descriptor.endpoint_uri(), "http://greeter.internal:9876");
    }

    #[test]
    fn test_with_address_keeps_other_fields() {
        let descriptor = ConnectionDescriptor::new("a:1", "hello", "defs/hello.proto")
            .with_address("b:2");
        assert_eq!(descriptor.address(), "b:2");
        assert_eq!(descriptor.proto_path(), Path::new("defs/hello.proto"));
    }

    #[test]
    fn test_resolved_proto_path_is_absolute() {
        let descriptor = ConnectionDescriptor::default();
        let resolved = descriptor.resolved_proto_path();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("crates/hello-proto/proto/hello.proto"));
    }

    #[test]
    fn test_default_proto_path_exists_from_workspace_root() {
        let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let descriptor = ConnectionDescriptor::default();
        assert!(
            workspace_root.join(descriptor.proto_path()).is_file(),
            "{} not found under the workspace root",
            descriptor.proto_path().display()
        );
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let toml = r#"
            address = "greeter:7000"
        "#;

        let descriptor: ConnectionDescriptor = toml::from_str(toml).unwrap();
        assert_eq!(descriptor.address(), "greeter:7000");
        assert_eq!(descriptor.package(), "hello");
        assert_eq!(descriptor.transport(), TransportKind::Grpc);
    }

    #[test]
    fn test_parse_toml_full() {
        let toml = r#"
            transport = "grpc"
            address = "localhost:9000"
            package = "hello"
            proto_path = "/srv/proto/hello.proto"
        "#;

        let descriptor: ConnectionDescriptor = toml::from_str(toml).unwrap();
        assert_eq!(descriptor.proto_path(), Path::new("/srv/proto/hello.proto"));
        assert_eq!(
            descriptor.resolved_proto_path(),
            PathBuf::from("/srv/proto/hello.proto")
        );
    }
}
