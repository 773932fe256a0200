//! Server lifecycle state machine.
//!
//! ```text
//! Starting ──▶ Running ──▶ ShuttingDown ──▶ Stopped
//!    │            │                            ▲
//!    │            └────────────────────────────┘ (listener failed)
//!    └──▶ Failed
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::lifecycle::error::LifecycleError;

/// Where a server is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
    Failed,
}

impl LifecycleState {
    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Starting, Running)
                | (Starting, Failed)
                | (Running, ShuttingDown)
                | (Running, Stopped)
                | (ShuttingDown, Stopped)
        )
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Stopped | LifecycleState::Failed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::ShuttingDown => "shutting-down",
            LifecycleState::Stopped => "stopped",
            LifecycleState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Shared, observable lifecycle state.
///
/// Cloning yields another handle to the same state.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    tx: Arc<watch::Sender<LifecycleState>>,
}

impl Lifecycle {
    /// Create a lifecycle in `Starting`.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LifecycleState::Starting);
        Self { tx: Arc::new(tx) }
    }

    /// Current state.
    pub fn current(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.tx.subscribe()
    }

    /// Move to `next`, rejecting transitions the state machine does not allow.
    pub fn transition(&self, next: LifecycleState) -> Result<(), LifecycleError> {
        let mut result = Ok(());
        self.tx.send_if_modified(|state| {
            if state.can_transition_to(next) {
                tracing::info!(from = %state, to = %next, "Lifecycle transition");
                *state = next;
                true
            } else {
                result = Err(LifecycleError::InvalidTransition {
                    from: *state,
                    to: next,
                });
                false
            }
        });
        result
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
