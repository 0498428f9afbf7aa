// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response body for POST /embeddings/encode/

use serde::{Deserialize, Serialize};

/// Response body for POST /embeddings/encode/
///
/// # Example
/// ```json
/// { "embeddings": [0.0123, -0.0456, ...] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncodeResponse {
    /// Sentence embedding, one value per model dimension
    pub embeddings: Vec<f32>,
}

impl EncodeResponse {
    pub fn dimension(&self) -> usize {
        self.embeddings.len()
    }
}
