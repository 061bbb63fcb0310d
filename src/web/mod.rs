//! HTTP front-end.
//!
//! One page at `/`: `GET` or `POST` with a `hostname` parameter scans it
//! and renders that address's history under the form.

pub mod error;
pub mod render;
mod routes;
pub mod state;

use crate::error::StartupError;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use routes::ScanParams;
pub use state::AppState;

/// Build the axum Router (useful for testing).
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index_get).post(routes::index_post))
        .route("/favicon.ico", get(routes::not_found))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
