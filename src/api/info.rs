// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /, GET /info and GET /health

use crate::api::http_server::AppState;
use crate::embeddings::ModelInfo;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Static model metadata: identifier, embedding size and sequence limit
pub async fn info_handler(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.model().info())
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model().info().model,
    })
}
