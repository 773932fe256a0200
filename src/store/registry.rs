//! Storage provider registry.
//!
//! # Responsibilities
//! - Map provider names to shared `Store` instances
//! - Reject duplicate registrations
//! - Resolve a provider by name for server construction
//!
//! # Design Decisions
//! - Explicit object built once in `main`, not a global
//! - Reader/writer lock: resolutions run in parallel, registrations are exclusive
//! - Duplicate registration is a programming error and panics

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::store::{memory, MemStore, Store};

/// Errors returned by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No provider registered under this name.
    #[error("store: unknown provider {0}")]
    UnknownProvider(String),

    /// A provider is already registered under this name.
    #[error("store: register called twice for provider {0}")]
    DuplicateProvider(String),
}

/// Name → provider table.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn Store>>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the providers bundled with this crate.
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register(memory::PROVIDER_NAME, Arc::new(MemStore::new()));
        registry
    }

    /// Register `provider` under `name`.
    ///
    /// # Panics
    /// Panics if `name` is already registered.
    pub fn register(&self, name: &str, provider: Arc<dyn Store>) {
        if let Err(e) = self.try_register(name, provider) {
            panic!("{}", e);
        }
    }

    /// Register `provider` under `name`, reporting duplicates instead of panicking.
    pub fn try_register(&self, name: &str, provider: Arc<dyn Store>) -> Result<(), RegistryError> {
        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        if providers.contains_key(name) {
            return Err(RegistryError::DuplicateProvider(name.to_string()));
        }
        providers.insert(name.to_string(), provider);
        tracing::debug!(provider = %name, "Storage provider registered");
        Ok(())
    }

    /// Look up the provider registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Store>, RegistryError> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownProvider(name.to_string()))
    }

    /// Registered provider names, sorted.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}
