//! End-to-end tests: bridge → real gRPC channel → reference SayHello server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hello_bridge::{
    BindingState, BridgeError, BridgeHandler, ConnectionDescriptor, GrpcBinding, ServiceBinding,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::Code;

/// Running reference server plus its shutdown trigger
struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), hello_proto::ServerError>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(hello_proto::serve_with_listener(listener, async {
            let _ = stop_rx.await;
        }));

        Self { addr, stop, task }
    }

    fn descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor::for_address(self.addr.to_string())
    }

    async fn stop(self) {
        self.stop.send(()).unwrap();
        self.task.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_hello_world_through_grpc() {
    let server = TestServer::start().await;

    let binding = Arc::new(GrpcBinding::unbound());
    binding.bind_from(&server.descriptor()).unwrap();
    let handler = BridgeHandler::new(binding).with_deadline(Duration::from_secs(5));

    assert_eq!(handler.handle("World").await.unwrap(), "Hello World");
    assert_eq!(handler.handle("").await.unwrap(), "Hello ");

    server.stop().await;
}

#[tokio::test]
async fn test_explicitly_constructed_binding() {
    let server = TestServer::start().await;

    let client = hello_bridge::connect(&server.descriptor()).unwrap();
    let handler = BridgeHandler::new(Arc::new(ServiceBinding::bound(client)));

    assert_eq!(handler.binding().state(), BindingState::Bound);
    assert_eq!(handler.handle("Ferris").await.unwrap(), "Hello Ferris");

    server.stop().await;
}

#[tokio::test]
async fn test_unreachable_address_is_transport_failure() {
    // Grab a free port, then release it so nothing is listening.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let binding = Arc::new(GrpcBinding::unbound());
    binding
        .bind_from(&ConnectionDescriptor::for_address(addr.to_string()))
        .unwrap();
    let handler = BridgeHandler::new(binding).with_deadline(Duration::from_secs(5));

    match handler.handle("World").await {
        Err(BridgeError::TransportFailure(status)) => {
            assert!(matches!(
                status.code(),
                Code::Unavailable | Code::Unknown | Code::DeadlineExceeded
            ));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_never_bound_always_uninitialized() {
    let server = TestServer::start().await;

    // The server is up, but the hook never ran.
    let binding = Arc::new(GrpcBinding::unbound());
    let handler = BridgeHandler::new(binding);

    for name in ["World", "", "again"] {
        assert!(matches!(
            handler.handle(name).await,
            Err(BridgeError::Uninitialized)
        ));
    }

    server.stop().await;
}
