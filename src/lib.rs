//! Bookstore: a small CRUD service for book records.
//!
//! Storage providers are registered by name in a [`store::ProviderRegistry`],
//! one is resolved at startup and exposed over HTTP by
//! [`http::BookStoreServer`], and [`lifecycle`] drives startup probing and
//! graceful shutdown.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::BookstoreConfig;
pub use http::BookStoreServer;
pub use lifecycle::{LifecycleError, LifecycleState, RunningServer};
pub use store::{Book, MemStore, ProviderRegistry, Store, StoreError};
