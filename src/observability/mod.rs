//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing macros (structured log events)
//!     → tower-http TraceLayer (one span per request)
//!
//! Consumers:
//!     → logging.rs subscriber → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - Request ID flows through every request span
//! - `RUST_LOG` overrides the configured filter

pub mod logging;

pub use logging::init_logging;
