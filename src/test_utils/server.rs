use std::net::SocketAddr;

use axum::Router;
use rusqlite::Connection;
use tokio::net::TcpListener;

use crate::api::{TRANSACTIONS, build_api_router};

/// Serve `router` on an ephemeral port on localhost and return its address.
///
/// The server runs until the test's runtime shuts down.
pub(crate) async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let addr = listener
        .local_addr()
        .expect("Could not get test listener address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    addr
}

/// Serve the transactions API backed by an in-memory database and return
/// the URL of its transactions endpoint.
pub(crate) async fn spawn_api_server() -> String {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let router = build_api_router(connection).expect("Could not build API router");
    let addr = spawn_router(router).await;

    format!("http://{addr}{TRANSACTIONS}")
}

/// A URL on localhost that refuses connections.
pub(crate) async fn unreachable_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let addr = listener
        .local_addr()
        .expect("Could not get test listener address");
    drop(listener);

    format!("http://{addr}{TRANSACTIONS}")
}
