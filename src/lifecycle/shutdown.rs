//! Shutdown coordination.
//!
//! # Responsibilities
//! - Broadcast the stop request to the listener task
//! - Bound the drain of in-flight requests by a deadline
//! - Race runtime failure against the termination signal

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::signals::Signal;
use crate::lifecycle::startup::RunningServer;
use crate::lifecycle::state::LifecycleState;

/// Stop request fanned out to the listener task.
///
/// Each listener subscribes before it starts serving; `trigger` wakes all of
/// them at once.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Wake every subscriber. Returns how many were still listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningServer {
    /// Stop accepting connections and drain in-flight requests.
    ///
    /// If draining outlasts `deadline` the listener task is aborted and
    /// `ShutdownTimeout` is returned. The server ends `Stopped` either way.
    pub async fn shutdown(self, deadline: Duration) -> Result<(), LifecycleError> {
        let RunningServer {
            lifecycle,
            shutdown,
            mut errors,
            mut task,
            ..
        } = self;

        lifecycle.transition(LifecycleState::ShuttingDown)?;
        let listeners = shutdown.trigger();
        tracing::info!(listeners, deadline = ?deadline, "Draining in-flight requests");

        let result = match tokio::time::timeout(deadline, &mut task).await {
            Ok(Ok(())) => match errors.try_recv() {
                Ok(err) => Err(err),
                Err(_) => Ok(()),
            },
            Ok(Err(join_err)) => Err(LifecycleError::Runtime(std::io::Error::other(join_err))),
            Err(_) => {
                tracing::warn!(deadline = ?deadline, "Drain deadline exceeded, aborting listener");
                task.abort();
                Err(LifecycleError::ShutdownTimeout(deadline))
            }
        };

        lifecycle.transition(LifecycleState::Stopped)?;
        result
    }
}

enum Event {
    Failed(LifecycleError),
    Signalled(Signal),
}

/// Serve until the listener fails or `signal` resolves.
///
/// A listener failure is returned as is, without a drain. A signal starts a
/// graceful shutdown bounded by the server's configured deadline.
pub async fn run_until_shutdown<F>(mut running: RunningServer, signal: F) -> Result<(), LifecycleError>
where
    F: Future<Output = Signal>,
{
    let event = tokio::select! {
        Some(err) = running.next_error() => Event::Failed(err),
        received = signal => Event::Signalled(received),
    };

    match event {
        Event::Failed(err) => {
            tracing::error!(error = %err, "HTTP server run failed");
            running.lifecycle.transition(LifecycleState::Stopped)?;
            Err(err)
        }
        Event::Signalled(received) => {
            tracing::info!(signal = %received, "Bookstore exiting");
            let deadline = running.shutdown_timeout();
            running.shutdown(deadline).await
        }
    }
}
