//! Lifecycle error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::lifecycle::state::LifecycleState;

/// Errors raised while starting, running, or stopping the server.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Bind(std::io::Error),

    /// The listener failed after it was bound.
    #[error("listener failed: {0}")]
    Runtime(std::io::Error),

    /// In-flight requests did not drain before the deadline.
    #[error("graceful shutdown exceeded deadline of {0:?}")]
    ShutdownTimeout(Duration),

    /// A state change that the lifecycle does not allow.
    #[error("invalid lifecycle transition from {from} to {to}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

/// Process exit status for a fatal lifecycle failure.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for the outcome of a serve-until-shutdown run.
///
/// `None` means the process should return from `main` normally.
pub fn exit_code(result: &Result<(), LifecycleError>) -> Option<i32> {
    match result {
        Ok(()) => None,
        Err(_) => Some(EXIT_FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&Ok(())), None);
        assert_eq!(
            exit_code(&Err(LifecycleError::ShutdownTimeout(Duration::from_secs(5)))),
            Some(1)
        );
        assert_eq!(
            exit_code(&Err(LifecycleError::Runtime(std::io::Error::other("gone")))),
            Some(1)
        );
    }

    #[test]
    fn test_error_display() {
        let err = LifecycleError::ShutdownTimeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "graceful shutdown exceeded deadline of 5s");

        let err = LifecycleError::InvalidTransition {
            from: LifecycleState::Stopped,
            to: LifecycleState::Running,
        };
        assert_eq!(
            err.to_string(),
            "invalid lifecycle transition from stopped to running"
        );
    }
}
