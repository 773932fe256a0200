//! Bookstore service (v1)
//!
//! ```text
//!   ProviderRegistry ──resolve(name)──▶ Arc<dyn Store>
//!                                            │
//!   client ──▶ request id ▶ trace ▶ logging ▶ content-type ▶ router ▶ handlers
//!
//!   lifecycle: Starting ─▶ Running ─▶ ShuttingDown ─▶ Stopped
//!                  └─▶ Failed
//! ```

use std::path::PathBuf;

use clap::Parser;

use bookstore::config::validation::validate_config;
use bookstore::config::{load_config, BookstoreConfig, ConfigError};
use bookstore::http::BookStoreServer;
use bookstore::lifecycle::{self, LifecycleError};
use bookstore::observability::init_logging;
use bookstore::store::ProviderRegistry;

#[derive(Parser)]
#[command(name = "bookstore")]
#[command(about = "HTTP CRUD service for book records", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override store.provider.
    #[arg(short, long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => BookstoreConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(provider) = args.provider {
        config.store.provider = provider;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    tracing::info!("bookstore v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        provider = %config.store.provider,
        shutdown_timeout_secs = config.lifecycle.shutdown_timeout_secs,
        "Configuration loaded"
    );

    let registry = ProviderRegistry::with_builtin();
    let store = match registry.resolve(&config.store.provider) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(
                error = %e,
                available = ?registry.provider_names(),
                "Storage provider not found"
            );
            std::process::exit(lifecycle::EXIT_FAILURE);
        }
    };

    let server = BookStoreServer::from_config(&config, store);
    let running = match server.listen_and_serve().await {
        Ok(running) => running,
        Err(e) => {
            tracing::error!(error = %e, "Web server start failed");
            std::process::exit(lifecycle::EXIT_FAILURE);
        }
    };
    tracing::info!("Web server start ok");

    let result = lifecycle::run_until_shutdown(running, lifecycle::shutdown_signal()).await;
    match &result {
        Ok(()) => tracing::info!("Bookstore exit ok"),
        Err(e @ LifecycleError::ShutdownTimeout(_)) => {
            tracing::warn!(error = %e, "Bookstore exit error")
        }
        Err(e) => tracing::error!(error = %e, "Bookstore exit error"),
    }

    if let Some(code) = lifecycle::exit_code(&result) {
        std::process::exit(code);
    }
    Ok(())
}
