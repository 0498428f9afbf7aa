// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::embed::encode_handler;
use super::info::{health_handler, info_handler};
use super::text::{chunks_handler, number_of_tokens_handler, truncate_handler};
use super::ApiError;
use crate::config::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
use crate::embeddings::TextModel;

/// Shared handler state: the one model loaded at startup
#[derive(Clone)]
pub struct AppState {
    model: Arc<dyn TextModel>,
}

impl AppState {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn TextModel {
        self.model.as_ref()
    }

    /// Runs a model call on the blocking pool
    ///
    /// Tokenization and inference are CPU-bound; keeping them off the async
    /// workers lets other requests make progress meanwhile.
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn TextModel) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let model = Arc::clone(&self.model);
        let result = tokio::task::spawn_blocking(move || f(model.as_ref()))
            .await
            .map_err(|e| {
                error!("Model task failed: {}", e);
                ApiError::InternalError("Model task failed".to_string())
            })?;

        result.map_err(|e| {
            error!("Model call failed: {:#}", e);
            ApiError::from(e)
        })
    }
}

/// Router with the default request body limit
pub fn create_app(state: AppState) -> Router {
    create_app_with_body_limit(state, DEFAULT_MAX_BODY_BYTES)
}

/// Router accepting JSON bodies up to `max_body_bytes`
///
/// POST routes answer both with and without the trailing slash.
pub fn create_app_with_body_limit(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(info_handler))
        .route("/info", get(info_handler))
        .route("/health", get(health_handler))
        .route("/embeddings/encode/", post(encode_handler))
        .route("/embeddings/encode", post(encode_handler))
        .route("/text/truncate/", post(truncate_handler))
        .route("/text/truncate", post(truncate_handler))
        .route("/text/number-of-tokens/", post(number_of_tokens_handler))
        .route("/text/number-of-tokens", post(number_of_tokens_handler))
        .route("/text/chunks/", post(chunks_handler))
        .route("/text/chunks", post(chunks_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C
pub async fn start_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = create_app_with_body_limit(state, config.max_body_bytes);

    let addr: SocketAddr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        "API server listening on {} (max body {} bytes)",
        addr, config.max_body_bytes
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("⏹️  Shutdown signal received");
}
