//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Spawn listener task → race probe timer vs. error channel
//!         error first → Failed (bind or serve error returned)
//!         timer first → Running (RunningServer returned)
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections (bounded) → Stopped
//!     Runtime error   → Stopped, no drain
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - State only moves forward; Running is entered at most once
//! - Bind failure is fatal, there is no retry
//! - Shutdown has timeout: forced stop after deadline, reported as error

pub mod error;
pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use error::{exit_code, LifecycleError, EXIT_FAILURE};
pub use shutdown::{run_until_shutdown, Shutdown};
pub use signals::{shutdown_signal, Signal};
pub use startup::RunningServer;
pub use state::{Lifecycle, LifecycleState};
