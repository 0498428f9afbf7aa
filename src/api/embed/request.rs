// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request body for POST /embeddings/encode/

use crate::api::validation::require_text;
use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Request body for POST /embeddings/encode/
///
/// # Example
/// ```json
/// { "text": "Hello, how are you?" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// Text to embed (at least 1 character)
    pub text: String,
}

impl EncodeRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("text", &self.text)
    }
}
