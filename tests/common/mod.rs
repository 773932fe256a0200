//! Shared utilities for integration tests.

use std::sync::Arc;

use bookstore::config::LifecycleConfig;
use bookstore::http::BookStoreServer;
use bookstore::lifecycle::RunningServer;
use bookstore::store::{Book, Store};

/// Short probe so tests do not wait a full second per server.
pub fn test_lifecycle() -> LifecycleConfig {
    LifecycleConfig {
        startup_probe_ms: 100,
        shutdown_timeout_secs: 5,
    }
}

/// Start a server on an ephemeral localhost port.
pub async fn start_server(store: Arc<dyn Store>) -> RunningServer {
    BookStoreServer::new("127.0.0.1:0", store)
        .with_lifecycle(test_lifecycle())
        .listen_and_serve()
        .await
        .expect("server should start")
}

/// Base URL of a running server.
pub fn base_url(running: &RunningServer) -> String {
    let addr = running.local_addr().expect("server should be bound");
    format!("http://{}", addr)
}

/// HTTP client that ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[allow(dead_code)]
pub fn sample_book(id: &str) -> Book {
    Book {
        id: id.to_string(),
        name: "X".to_string(),
        authors: vec!["A".to_string()],
        press: "P".to_string(),
    }
}
