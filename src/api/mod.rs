//! HTTP layer - JSON endpoints over the core order and product operations
//!
//! Handlers only translate between HTTP and the core functions; all rules live
//! in [`crate::core`].

/// Error to response mapping
pub mod error;
/// `/orders` endpoints
pub mod orders;
/// `/products` endpoints
pub mod products;

use crate::errors::Result;
use axum::{Json, Router, routing::get};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info};

/// Shared state available to all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: Arc<DatabaseConnection>,
    /// Page size used when a listing request gives none
    pub default_page_size: u64,
}

impl AppState {
    /// Creates the handler state.
    #[must_use]
    pub fn new(database: DatabaseConnection, default_page_size: u64) -> Self {
        Self {
            database: Arc::new(database),
            default_page_size,
        }
    }

    /// The shared connection.
    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.database
    }
}

/// Builds the full router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/orders", orders::router())
        .nest("/products", products::router())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Serves `router` on `listener` until Ctrl+C.
///
/// # Errors
/// Returns an error if the listener address cannot be read or the server fails.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| error!("Server encountered an error: {e}"))?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C signal, shutting down gracefully"),
        Err(e) => error!("Failed to listen for Ctrl+C: {e}"),
    }
}
