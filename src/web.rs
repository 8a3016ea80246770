use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::actions::ActionRegistry;
use crate::api;
use crate::config::ServerConfig;

pub fn app(registry: ActionRegistry) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(Arc::new(registry))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(registry: ActionRegistry, config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind to {addr}"))?;
    tracing::info!("Action server running at http://{}", addr);

    axum::serve(listener, app(registry))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| "Action server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
