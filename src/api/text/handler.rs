// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Handlers for POST /text/truncate/, /text/number-of-tokens/ and /text/chunks/
//!
//! Every handler validates its body before touching the model, so a
//! rejected request never reaches the tokenizer.

use super::request::{ChunksRequest, NumberOfTokensRequest, TruncateRequest};
use super::response::{ChunksResponse, NumberOfTokensResponse, TruncateResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;
use crate::embeddings::{chunk_text, truncate_text};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{debug, warn};

/// POST /text/truncate/ - keep the first `max_tokens` tokens of `text`
pub async fn truncate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TruncateRequest>, JsonRejection>,
) -> Result<Json<TruncateResponse>, ApiError> {
    let Json(request) = payload?;
    let max_tokens = request.validate().inspect_err(|e| {
        warn!("Truncate validation failed: {}", e);
    })?;

    let truncated_text = state
        .run_blocking(move |model| truncate_text(model, &request.text, max_tokens))
        .await?;

    Ok(Json(TruncateResponse { truncated_text }))
}

/// POST /text/number-of-tokens/ - count tokens without special tokens
pub async fn number_of_tokens_handler(
    State(state): State<AppState>,
    payload: Result<Json<NumberOfTokensRequest>, JsonRejection>,
) -> Result<Json<NumberOfTokensResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate().inspect_err(|e| {
        warn!("Token count validation failed: {}", e);
    })?;

    let number_of_tokens = state
        .run_blocking(move |model| model.count_tokens(&request.text))
        .await?;
    debug!("Counted {} tokens", number_of_tokens);

    Ok(Json(NumberOfTokensResponse { number_of_tokens }))
}

/// POST /text/chunks/ - split `text` into chunks of at most `max_tokens` tokens
pub async fn chunks_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChunksRequest>, JsonRejection>,
) -> Result<Json<ChunksResponse>, ApiError> {
    let Json(request) = payload?;
    let max_tokens = request.validate().inspect_err(|e| {
        warn!("Chunk validation failed: {}", e);
    })?;

    let text_in_chunks = state
        .run_blocking(move |model| chunk_text(model, &request.text, max_tokens))
        .await?;

    Ok(Json(ChunksResponse { text_in_chunks }))
}
