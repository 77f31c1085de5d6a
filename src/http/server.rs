//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, ConfigError};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(#[from] ConfigError),

    #[error("Server error on {addr}: {source}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Start the HTTP server based on configuration.
///
/// Resolves once the server has shut down, either after a signal-triggered
/// graceful shutdown or because binding/serving failed.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.http.socket_addr()?;
    let grace = Duration::from_secs(config.http.shutdown_grace_seconds);

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone(), grace);
    log_when_listening(handle.clone());

    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|source| ServerError::Serve { addr, source })?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Log the bound address once the listener is up (resolves port 0 too).
fn log_when_listening(handle: Handle) {
    tokio::spawn(async move {
        if let Some(addr) = handle.listening().await {
            tracing::info!(%addr, "Quote API listening");
        }
    });
}
