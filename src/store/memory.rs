//! In-memory storage provider.
//!
//! Backed by a `DashMap`, so concurrent handlers can read and write without an
//! outer lock. Nothing is persisted; contents vanish with the process.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::store::{Book, Store, StoreError, StoreResult};

/// Name the in-memory provider registers under.
pub const PROVIDER_NAME: &str = "mem";

/// A thread-safe, process-local book store.
#[derive(Debug, Default)]
pub struct MemStore {
    books: DashMap<String, Book>,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the store holds no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Store for MemStore {
    fn create(&self, book: &Book) -> StoreResult<()> {
        // entry() holds the shard lock, so check-and-insert is atomic
        match self.books.entry(book.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(book.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(book.clone());
                tracing::debug!(id = %book.id, "Book created");
                Ok(())
            }
        }
    }

    fn update(&self, book: &Book) -> StoreResult<()> {
        match self.books.get_mut(&book.id) {
            Some(mut existing) => {
                *existing = book.clone();
                tracing::debug!(id = %book.id, "Book updated");
                Ok(())
            }
            None => Err(StoreError::NotFound(book.id.clone())),
        }
    }

    fn get(&self, id: &str) -> StoreResult<Book> {
        self.books
            .get(id)
            .map(|b| b.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get_all(&self) -> StoreResult<Vec<Book>> {
        let mut books: Vec<Book> = self.books.iter().map(|b| b.value().clone()).collect();
        books.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(books)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.books
            .remove(id)
            .map(|_| tracing::debug!(id = %id, "Book deleted"))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
