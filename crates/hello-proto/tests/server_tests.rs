//! Integration tests for the reference SayHello server over a real socket.

use hello_proto::{serve_with_listener, HelloRequest, SayHelloClient};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_round_trip_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_listener(listener, async {
        let _ = stop_rx.await;
    }));

    let mut client = SayHelloClient::connect(format!("http://{}", addr))
        .await
        .unwrap();
    let response = client
        .say_hello(HelloRequest {
            name: "World".to_string(),
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.message, "Hello World");

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
