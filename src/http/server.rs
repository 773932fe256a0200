//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the book routes
//! - Wire up the interceptor chain (request ID, tracing, logging, validation)
//! - Bind the listener and serve until told to stop
//!
//! Starting, probing, and stopping a server is driven by `crate::lifecycle`.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use axum::{middleware, routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{BookstoreConfig, LifecycleConfig};
use crate::http::handlers;
use crate::http::middleware::{log_request, validate_content_type};
use crate::http::request::UuidRequestId;
use crate::lifecycle::{startup, LifecycleError, RunningServer};
use crate::store::Store;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

/// HTTP server exposing a storage provider as a REST API.
pub struct BookStoreServer {
    bind_address: String,
    router: Router,
    lifecycle: LifecycleConfig,
}

impl BookStoreServer {
    /// Create a server for `bind_address` backed by `store`.
    pub fn new(bind_address: impl Into<String>, store: Arc<dyn Store>) -> Self {
        Self {
            bind_address: bind_address.into(),
            router: build_router(store),
            lifecycle: LifecycleConfig::default(),
        }
    }

    /// Create a server from a loaded configuration.
    pub fn from_config(config: &BookstoreConfig, store: Arc<dyn Store>) -> Self {
        Self::new(config.listener.bind_address.clone(), store)
            .with_lifecycle(config.lifecycle.clone())
    }

    /// Override startup probe and shutdown timing.
    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Address the server will bind to.
    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    /// Lifecycle timing in effect.
    pub fn lifecycle_config(&self) -> &LifecycleConfig {
        &self.lifecycle
    }

    /// Start serving on a background task.
    ///
    /// Resolves once the startup probe window has passed without error.
    pub async fn listen_and_serve(self) -> Result<RunningServer, LifecycleError> {
        startup::start(self).await
    }

    /// Bind and serve until `shutdown` fires. Runs on the listener task.
    pub(crate) async fn serve(
        self,
        mut shutdown: broadcast::Receiver<()>,
        bound: Arc<OnceLock<SocketAddr>>,
    ) -> Result<(), LifecycleError> {
        let listener = TcpListener::bind(&self.bind_address)
            .await
            .map_err(LifecycleError::Bind)?;
        let addr = listener.local_addr().map_err(LifecycleError::Bind)?;
        let _ = bound.set(addr);

        tracing::info!(address = %addr, "HTTP server listening");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await
            .map_err(LifecycleError::Runtime)?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the book router wrapped in its interceptor chain.
///
/// Layers listed first in the `ServiceBuilder` run first.
pub fn build_router(store: Arc<dyn Store>) -> Router {
    let state = AppState { store };

    Router::new()
        .route(
            "/book",
            post(handlers::create_book).get(handlers::get_all_books),
        )
        .route(
            "/book/{id}",
            post(handlers::update_book)
                .get(handlers::get_book)
                .delete(handlers::delete_book),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(log_request))
                .layer(middleware::from_fn(validate_content_type)),
        )
}
