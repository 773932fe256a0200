//! Startup orchestration.
//!
//! # Responsibilities
//! - Spawn the listener task
//! - Tell an immediate bind failure apart from a server that came up
//! - Hand back a `RunningServer` that reports later listener failures
//!
//! # Design Decisions
//! - Fail fast: any error inside the probe window is fatal
//! - The probe window is a fixed timer, not a health check

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::http::BookStoreServer;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::state::{Lifecycle, LifecycleState};

/// Handle to a server that survived its startup probe.
///
/// Dropping the handle without calling `shutdown` lets the listener drain and
/// stop on its own.
pub struct RunningServer {
    pub(crate) lifecycle: Lifecycle,
    pub(crate) shutdown: Shutdown,
    pub(crate) errors: mpsc::Receiver<LifecycleError>,
    pub(crate) task: JoinHandle<()>,
    pub(crate) local_addr: Option<SocketAddr>,
    pub(crate) shutdown_timeout: Duration,
}

impl RunningServer {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.current()
    }

    /// Handle that keeps observing state after the server is consumed.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    /// Configured graceful shutdown deadline.
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    /// Wait for the listener to fail.
    ///
    /// Returns `None` if the listener task ended without error.
    pub async fn next_error(&mut self) -> Option<LifecycleError> {
        self.errors.recv().await
    }
}

/// Start `server` on a background task and wait out the startup probe.
pub async fn start(server: BookStoreServer) -> Result<RunningServer, LifecycleError> {
    let lifecycle = Lifecycle::new();
    let probe = server.lifecycle_config().startup_probe();
    let shutdown_timeout = server.lifecycle_config().shutdown_timeout();
    let bind_address = server.bind_address().to_string();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let (errors_tx, mut errors) = mpsc::channel(1);
    let bound = Arc::new(OnceLock::new());

    tracing::info!(address = %bind_address, probe = ?probe, "Starting HTTP server");

    let task_bound = bound.clone();
    let task = tokio::spawn(async move {
        if let Err(e) = server.serve(shutdown_rx, task_bound).await {
            tracing::error!(error = %e, "HTTP server task failed");
            let _ = errors_tx.send(e).await;
        }
    });

    tokio::select! {
        Some(err) = errors.recv() => {
            lifecycle.transition(LifecycleState::Failed)?;
            return Err(err);
        }
        _ = tokio::time::sleep(probe) => {}
    }

    // Channel closed without an error: the task is gone (panicked or aborted).
    if task.is_finished() {
        lifecycle.transition(LifecycleState::Failed)?;
        return Err(LifecycleError::Runtime(std::io::Error::other(
            "listener task exited during startup",
        )));
    }

    lifecycle.transition(LifecycleState::Running)?;
    let local_addr = bound.get().copied();
    tracing::info!(address = ?local_addr, "HTTP server running");

    Ok(RunningServer {
        lifecycle,
        shutdown,
        errors,
        task,
        local_addr,
        shutdown_timeout,
    })
}
