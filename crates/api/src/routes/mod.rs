pub mod analytics;
pub mod content;
pub mod emails;
pub mod health;
pub mod visitors;

use std::net::SocketAddr;

use axum::http::HeaderMap;
use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(content::routes())
        .merge(emails::routes())
        .merge(visitors::routes())
        .merge(analytics::routes())
        .with_state(state)
}

/// Client address as the ledgers should record it: the first hop in
/// `X-Forwarded-For` when a proxy set it, the socket peer otherwise.
pub(crate) fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "10.0.0.1:55555".parse().unwrap()
    }

    #[test]
    fn falls_back_to_the_socket_peer() {
        assert_eq!(client_ip(&HeaderMap::new(), peer()), "10.0.0.1");
    }

    #[test]
    fn prefers_the_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.2"),
        );
        assert_eq!(client_ip(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn ignores_an_empty_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_ip(&headers, peer()), "10.0.0.1");
    }
}
