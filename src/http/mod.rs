//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, listener)
//!     → request.rs (assign request ID)
//!     → middleware/logging.rs (log request)
//!     → middleware/content_type.rs (JSON check on writes)
//!     → handlers.rs (decode, call Store, encode)
//!     → error.rs (map failures to status codes)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, BookStoreServer};
