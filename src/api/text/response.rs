// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response bodies for the /text/ endpoints

use serde::{Deserialize, Serialize};

/// Response body for POST /text/number-of-tokens/
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumberOfTokensResponse {
    pub number_of_tokens: usize,
}

/// Response body for POST /text/truncate/
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TruncateResponse {
    pub truncated_text: String,
}

/// Response body for POST /text/chunks/
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunksResponse {
    pub text_in_chunks: Vec<String>,
}
