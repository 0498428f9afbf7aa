// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request bodies for the /text/ endpoints
//!
//! `max_tokens` is read as a signed integer so that zero and negative
//! values reach `validate()` and get a field-level error instead of a
//! generic deserialization failure.

use crate::api::validation::{require_positive, require_text};
use crate::api::ApiError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Request body for POST /text/number-of-tokens/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberOfTokensRequest {
    /// Text to count (at least 1 character)
    pub text: String,
}

impl NumberOfTokensRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("text", &self.text)
    }
}

/// Request body for POST /text/truncate/
///
/// # Example
/// ```json
/// { "text": "Hello, how are you?", "max_tokens": 2 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruncateRequest {
    /// Text to truncate (at least 1 character)
    pub text: String,

    /// Number of leading tokens to keep (> 0)
    pub max_tokens: i64,
}

impl TruncateRequest {
    /// Checks both fields and returns the token bound
    pub fn validate(&self) -> Result<NonZeroUsize, ApiError> {
        require_text("text", &self.text)?;
        require_positive("max_tokens", self.max_tokens)
    }
}

/// Request body for POST /text/chunks/
///
/// # Example
/// ```json
/// { "text": "Hello, how are you?", "max_tokens": 2 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunksRequest {
    /// Text to split (at least 1 character)
    pub text: String,

    /// Maximum tokens per chunk (> 0)
    pub max_tokens: i64,
}

impl ChunksRequest {
    /// Checks both fields and returns the per-chunk token bound
    pub fn validate(&self) -> Result<NonZeroUsize, ApiError> {
        require_text("text", &self.text)?;
        require_positive("max_tokens", self.max_tokens)
    }
}
