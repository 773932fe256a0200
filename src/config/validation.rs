//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BookstoreConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::BookstoreConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Bind address is not `host:port`.
    #[error("listener.bind_address '{0}' is not a host:port address")]
    InvalidBindAddress(String),

    /// No storage provider named.
    #[error("store.provider must not be empty")]
    EmptyProvider,

    /// A duration field is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// `host:port` shape only; name resolution is left to bind.
fn is_host_port(addr: &str) -> bool {
    match addr.rsplit_once(':') {
        Some((host, port)) => !host.trim().is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &BookstoreConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_host_port(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.store.provider.trim().is_empty() {
        errors.push(ValidationError::EmptyProvider);
    }

    if config.lifecycle.startup_probe_ms == 0 {
        errors.push(ValidationError::ZeroDuration("lifecycle.startup_probe_ms"));
    }

    if config.lifecycle.shutdown_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("lifecycle.shutdown_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
