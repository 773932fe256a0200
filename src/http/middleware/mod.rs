//! Request interceptors wrapped around the book router.
//!
//! Order, outer to inner:
//! ```text
//! logging.rs       → log every request
//! content_type.rs  → reject write requests that are not JSON
//! router           → handlers.rs
//! ```

pub mod content_type;
pub mod logging;

pub use content_type::{parse_media_type, validate_content_type, MediaTypeError};
pub use logging::log_request;
