//! Startup and shutdown behaviour of the lifecycle controller.

use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bookstore::http::BookStoreServer;
use bookstore::lifecycle::{run_until_shutdown, LifecycleError, LifecycleState, Signal};
use bookstore::store::{Book, MemStore, Store, StoreResult};

mod common;

#[tokio::test]
async fn test_start_reaches_running() {
    let running = common::start_server(Arc::new(MemStore::new())).await;
    assert_eq!(running.state(), LifecycleState::Running);
    assert!(running.local_addr().is_some());

    let lifecycle = running.lifecycle();
    running.shutdown(Duration::from_secs(5)).await.unwrap();
    assert_eq!(lifecycle.current(), LifecycleState::Stopped);
}

#[tokio::test]
async fn test_immediate_signal_exits_ok_within_deadline() {
    let running = common::start_server(Arc::new(MemStore::new())).await;
    let lifecycle = running.lifecycle();
    let started = Instant::now();

    let result = run_until_shutdown(running, async { Signal::Terminate }).await;

    assert!(result.is_ok(), "expected clean exit, got {:?}", result);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(lifecycle.current(), LifecycleState::Stopped);
}

#[tokio::test]
async fn test_bind_failure_is_reported_synchronously() {
    let taken = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap();

    let result = BookStoreServer::new(addr.to_string(), Arc::new(MemStore::new()))
        .with_lifecycle(common::test_lifecycle())
        .listen_and_serve()
        .await;

    assert!(matches!(result, Err(LifecycleError::Bind(_))));
    drop(taken);
}

#[tokio::test]
async fn test_unresolvable_address_fails_startup() {
    let result = BookStoreServer::new("not-an-address", Arc::new(MemStore::new()))
        .with_lifecycle(common::test_lifecycle())
        .listen_and_serve()
        .await;

    assert!(matches!(result, Err(LifecycleError::Bind(_))));
}

#[tokio::test]
async fn test_shutdown_after_traffic_drains_idle_connections() {
    let running = common::start_server(Arc::new(MemStore::new())).await;
    let base = common::base_url(&running);

    let res = common::client()
        .get(format!("{}/book", base))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());

    let result = tokio::time::timeout(
        Duration::from_secs(6),
        running.shutdown(Duration::from_secs(5)),
    )
    .await
    .expect("shutdown should finish within its deadline");
    assert!(result.is_ok());
}

/// Store whose reads block long enough to outlive a short drain deadline.
struct SlowStore {
    inner: MemStore,
    delay: Duration,
}

impl Store for SlowStore {
    fn create(&self, book: &Book) -> StoreResult<()> {
        self.inner.create(book)
    }

    fn update(&self, book: &Book) -> StoreResult<()> {
        self.inner.update(book)
    }

    fn get(&self, id: &str) -> StoreResult<Book> {
        std::thread::sleep(self.delay);
        self.inner.get(id)
    }

    fn get_all(&self) -> StoreResult<Vec<Book>> {
        self.inner.get_all()
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.inner.delete(id)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_in_flight_request_past_deadline_times_out() {
    let store = Arc::new(SlowStore {
        inner: MemStore::new(),
        delay: Duration::from_secs(2),
    });
    let running = common::start_server(store).await;
    let base = common::base_url(&running);
    let lifecycle = running.lifecycle();

    let client = common::client();
    let in_flight = tokio::spawn(async move { client.get(format!("{}/book/slow", base)).send().await });
    tokio::time::sleep(Duration::from_millis(200)).await;

    let deadline = Duration::from_millis(200);
    let result = running.shutdown(deadline).await;

    assert!(matches!(result, Err(LifecycleError::ShutdownTimeout(d)) if d == deadline));
    assert_eq!(lifecycle.current(), LifecycleState::Stopped);
    in_flight.abort();
}
