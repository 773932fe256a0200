//! Book storage subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     provider (memory.rs) → registry.rs (register by name)
//!     config.store.provider → registry.rs (resolve) → Arc<dyn Store>
//!
//! per request:
//!     http handler → Store trait → provider implementation
//! ```
//!
//! # Design Decisions
//! - Handlers only ever see `Arc<dyn Store>`, never a concrete provider
//! - Providers own their synchronization; the HTTP layer calls them concurrently
//! - Registration is append-only and happens before any resolution

pub mod memory;
pub mod registry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemStore;
pub use registry::{ProviderRegistry, RegistryError};

/// A single book record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Caller-assigned identifier (typically an ISBN).
    pub id: String,
    /// Title.
    pub name: String,
    /// Authors, in display order.
    pub authors: Vec<String>,
    /// Publisher.
    pub press: String,
}

/// Errors returned by storage providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No book with the given id.
    #[error("book {0} not found")]
    NotFound(String),

    /// A book with the given id is already stored.
    #[error("book {0} already exists")]
    AlreadyExists(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Capability set every storage provider implements.
pub trait Store: Send + Sync {
    /// Insert a new book. Fails if the id is taken.
    fn create(&self, book: &Book) -> StoreResult<()>;

    /// Replace an existing book. Fails if the id is absent.
    fn update(&self, book: &Book) -> StoreResult<()>;

    /// Fetch one book by id.
    fn get(&self, id: &str) -> StoreResult<Book>;

    /// Fetch every stored book. Order is provider-defined.
    fn get_all(&self) -> StoreResult<Vec<Book>>;

    /// Remove a book by id.
    fn delete(&self, id: &str) -> StoreResult<()>;
}
