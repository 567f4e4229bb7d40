//! Shared helpers: an in-process mock of the funnel API bound to an
//! ephemeral port, and an address that is guaranteed to refuse
//! connections.

use std::time::Duration;

use axum::Router;
use funnel_client::FallbackPolicy;

/// Serve `router` on an ephemeral localhost port, returning the base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock api");
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on: bind a port, then release it.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Short timeout so unreachable-store tests stay fast.
pub fn test_policy() -> FallbackPolicy {
    FallbackPolicy::with_timeout(Duration::from_secs(2))
}
