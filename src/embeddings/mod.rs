// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding model seam and tokenization utilities
//!
//! Everything the server knows about the pretrained model goes through the
//! [`TextModel`] trait: tokenize, detokenize, count and encode. The
//! production binding is [`OnnxEmbeddingModel`]; [`StubTextModel`] is a
//! deterministic stand-in for tests and local development.

pub mod model_loader;
pub mod onnx_model;
pub mod stub_model;
pub mod text;

pub use model_loader::{load_model, EmbeddingModelConfig};
pub use onnx_model::{OnnxEmbeddingModel, OnnxModelSettings};
pub use stub_model::StubTextModel;
pub use text::{chunk_text, chunk_tokens, truncate_text, truncate_tokens};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default model served when nothing else is configured
pub const DEFAULT_MODEL_ID: &str = "intfloat/e5-large-v2";

/// Embedding dimension of the default model
pub const DEFAULT_EMBEDDING_SIZE: usize = 1024;

/// Maximum sequence length of the default model
pub const DEFAULT_SEQUENCE_LIMIT: usize = 512;

/// Static metadata describing the loaded model
///
/// Serialized with the exact keys the info endpoint exposes, so the same
/// type is used by the server and by [`crate::client::EmbeddingClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model: String,

    #[serde(rename = "embedding size")]
    pub embedding_size: usize,

    #[serde(rename = "sequence limit")]
    pub sequence_limit: usize,
}

/// Read-only view of a pretrained text model and its tokenizer
///
/// Implementations are loaded once and shared between requests, so every
/// method takes `&self`. Token sequences returned by [`TextModel::tokenize`]
/// include the model's special tokens ("encode" mode);
/// [`TextModel::count_tokens`] counts in "tokenize" mode, without them.
#[cfg_attr(test, mockall::automock)]
pub trait TextModel: Send + Sync {
    /// Model identifier, embedding size and sequence limit
    fn info(&self) -> ModelInfo;

    /// Token IDs for `text`, special tokens included
    fn tokenize(&self, text: &str) -> Result<Vec<u32>>;

    /// Number of sub-word tokens in `text`, special tokens excluded
    fn count_tokens(&self, text: &str) -> Result<usize>;

    /// Text for `tokens` with special/control tokens skipped
    fn detokenize(&self, tokens: &[u32]) -> Result<String>;

    /// Sentence embedding for `text`
    fn encode(&self, text: &str) -> Result<Vec<f32>>;
}
