//! HTTP server wiring.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Creates new app state with the given config.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

/// Builds the application router.
///
/// # Routes
///
/// - `POST /replay-sjk` - Fill the template from a JSON object of strings
/// - `GET /replay-sjk/fields` - List the template's form fields
/// - `GET /health` - Health check
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/replay-sjk", post(handlers::replay_sjk))
        .route("/replay-sjk/fields", get(handlers::template_fields))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Creates a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(config.clone()));
        Self { config, state }
    }

    /// Creates the router.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the listener cannot bind.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr()?;
        let router = self.router();

        if !self.config.template_path.exists() {
            tracing::warn!(
                template = %self.config.template_path.display(),
                "Template not found, fill requests will fail until it exists"
            );
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            addr = %addr,
            template = %self.config.template_path.display(),
            output_mode = ?self.config.output_mode,
            "Server is running on port {}",
            addr.port()
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
