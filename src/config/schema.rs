//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the bookstore service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BookstoreConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Storage provider selection.
    pub store: StoreConfig,

    /// Startup and shutdown timing.
    pub lifecycle: LifecycleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Registry name of the storage provider to use.
    pub provider: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: crate::store::memory::PROVIDER_NAME.to_string(),
        }
    }
}

/// Lifecycle timing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// How long the listener must run without error before startup counts as successful.
    pub startup_probe_ms: u64,

    /// Upper bound on draining in-flight requests during graceful shutdown.
    pub shutdown_timeout_secs: u64,
}

impl LifecycleConfig {
    /// Startup probe window as a `Duration`.
    pub fn startup_probe(&self) -> Duration {
        Duration::from_millis(self.startup_probe_ms)
    }

    /// Shutdown deadline as a `Duration`.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            startup_probe_ms: 1000,
            shutdown_timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "bookstore=info,tower_http=info".to_string(),
        }
    }
}
