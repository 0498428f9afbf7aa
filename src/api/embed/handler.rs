// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embeddings/encode/ HTTP handler

use crate::api::embed::{EncodeRequest, EncodeResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{debug, warn};

/// POST /embeddings/encode/ handler
///
/// Generates the sentence embedding for `text` with the loaded model.
///
/// # Errors
/// - 422 Unprocessable Entity: `text` missing or empty
/// - 400 Bad Request: body is not valid JSON
/// - 413 Payload Too Large: body over the configured limit
/// - 500 Internal Server Error: tokenizer or inference failure
pub async fn encode_handler(
    State(state): State<AppState>,
    payload: Result<Json<EncodeRequest>, JsonRejection>,
) -> Result<Json<EncodeResponse>, ApiError> {
    let Json(request) = payload?;
    if let Err(e) = request.validate() {
        warn!("Encode validation failed: {}", e);
        return Err(e);
    }

    debug!("Encoding {} characters", request.text.len());
    let embeddings = state
        .run_blocking(move |model| model.encode(&request.text))
        .await?;

    let response = EncodeResponse { embeddings };
    debug!("Encoded into {} dimensions", response.dimension());

    Ok(Json(response))
}
