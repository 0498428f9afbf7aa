// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! Runs a sentence-transformer export (intfloat/e5-large-v2 by default)
//! with ONNX Runtime and exposes it through [`TextModel`].
//!
//! Features:
//! - ONNX model loading from disk
//! - GPU acceleration via CUDA (with automatic CPU fallback)
//! - HuggingFace tokenizer for tokenize / detokenize
//! - Mean pooling over token embeddings, optional L2 normalization
//! - Embedding dimension discovered from the model at load time

use super::{ModelInfo, TextModel};
use anyhow::{anyhow, Context, Result};
use ndarray::{Array2, ArrayView2, Axis, Ix3};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

/// Runtime knobs for [`OnnxEmbeddingModel`]
#[derive(Debug, Clone)]
pub struct OnnxModelSettings {
    /// Longest input (in tokens, special tokens included) fed to the model
    pub max_length: usize,

    /// Apply L2 normalization after mean pooling
    pub normalize: bool,

    /// ONNX Runtime intra-op thread count
    pub intra_threads: usize,
}

impl Default for OnnxModelSettings {
    fn default() -> Self {
        Self {
            max_length: super::DEFAULT_SEQUENCE_LIMIT,
            normalize: true,
            intra_threads: 4,
        }
    }
}

/// ONNX-based sentence embedding model
///
/// # Model Details
/// - Input: text, truncated to `max_length` tokens for inference only
/// - Output: f32 vectors, dimension read from the model's hidden size
/// - Provider: CUDA when available, CPU otherwise
///
/// Two tokenizer instances are kept. The inference tokenizer truncates to
/// the sequence limit the way sentence-transformers does before encoding;
/// the plain tokenizer never truncates so token counts, truncation and
/// chunking see the whole input.
///
/// # Thread Safety
/// Tokenizers are read-only and shared via `Arc`. The session needs `&mut`
/// to run, so it sits behind a `Mutex`.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    inference_tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
    max_length: usize,
    normalize: bool,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.max_length)
            .field("normalize", &self.normalize)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// Loading is blocking (session creation plus one validation
    /// inference); async callers should go through
    /// [`super::load_model`], which moves it onto the blocking pool.
    ///
    /// # Errors
    /// Returns error if:
    /// - Model or tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - Model output is not `[batch, seq_len, hidden]` or `[batch, hidden]`
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxEmbeddingModel::new(
    ///     "intfloat/e5-large-v2",
    ///     "./models/e5-large-v2/model.onnx",
    ///     "./models/e5-large-v2/tokenizer.json",
    ///     OnnxModelSettings::default(),
    /// )?;
    /// ```
    pub fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
        settings: OnnxModelSettings,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }
        if settings.max_length == 0 {
            anyhow::bail!("Maximum sequence length must be greater than 0");
        }

        info!("🚀 Initializing ONNX embedding model {}", model_name);
        info!("   Attempting CUDA execution provider...");
        let cuda_result = session_builder(settings.intra_threads)?
            .with_execution_providers([CUDAExecutionProvider::default().build()])
            .context("Failed to set CUDA execution provider")?
            .commit_from_file(model_path);

        let mut session = match cuda_result {
            Ok(s) => {
                info!("✅ CUDA execution provider initialized successfully!");
                s
            }
            Err(e) => {
                warn!("⚠️  CUDA execution provider failed: {}", e);
                warn!("   Falling back to CPU execution provider");
                session_builder(settings.intra_threads)?
                    .with_execution_providers([CPUExecutionProvider::default().build()])
                    .context("Failed to set CPU execution provider")?
                    .commit_from_file(model_path)
                    .with_context(|| {
                        format!("Failed to load ONNX model from {}", model_path.display())
                    })?
            }
        };

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(None)
            .map_err(|e| anyhow!("Failed to disable tokenizer truncation: {}", e))?;

        let mut inference_tokenizer = tokenizer.clone();
        inference_tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: settings.max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure tokenizer truncation: {}", e))?;

        // Discover the hidden size with one inference; the outputs borrow the
        // session, so keep them inside this block
        let dimension = {
            let encoding = inference_tokenizer
                .encode("validation test", true)
                .map_err(|e| anyhow!("Tokenizer validation failed: {}", e))?;
            let pooled = run_and_pool(&mut session, encoding.get_ids(), encoding.get_attention_mask())
                .context("Validation inference failed")?;
            pooled.len()
        };

        if dimension == 0 {
            anyhow::bail!("Model {} produced an empty embedding", model_name);
        }

        info!(
            "✅ ONNX embedding model loaded: {} ({} dimensions, sequence limit {})",
            model_name, dimension, settings.max_length
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            inference_tokenizer: Arc::new(inference_tokenizer),
            model_name,
            dimension,
            max_length: settings.max_length,
            normalize: settings.normalize,
        })
    }

    /// Returns the output dimension of this model
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the sequence limit applied to encode inputs
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl TextModel for OnnxEmbeddingModel {
    fn info(&self) -> ModelInfo {
        ModelInfo {
            model: self.model_name.clone(),
            embedding_size: self.dimension,
            sequence_limit: self.max_length,
        }
    }

    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn count_tokens(&self, text: &str) -> Result<usize> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        Ok(encoding.get_tokens().len())
    }

    fn detokenize(&self, tokens: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(tokens, true)
            .map_err(|e| anyhow!("Detokenization failed: {}", e))
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .inference_tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("ONNX session lock poisoned"))?;
        let mut embedding =
            run_and_pool(&mut session, encoding.get_ids(), encoding.get_attention_mask())?;
        drop(session);

        if embedding.len() != self.dimension {
            anyhow::bail!(
                "Unexpected embedding dimension: {} (expected {})",
                embedding.len(),
                self.dimension
            );
        }

        if self.normalize {
            l2_normalize(&mut embedding);
        }

        Ok(embedding)
    }
}

fn session_builder(intra_threads: usize) -> Result<SessionBuilder> {
    Session::builder()
        .context("Failed to create session builder")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(intra_threads)
        .context("Failed to set intra threads")
}

/// Runs one sequence through the session and returns its sentence embedding
///
/// Token-level outputs `[1, seq_len, hidden]` are mean pooled; models that
/// already pool (`[1, hidden]`) are passed through.
fn run_and_pool(session: &mut Session, ids: &[u32], mask: &[u32]) -> Result<Vec<f32>> {
    let seq_len = ids.len();
    let input_ids: Vec<i64> = ids.iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = mask.iter().map(|&m| m as i64).collect();
    let token_type_ids: Vec<i64> = vec![0i64; seq_len];

    let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
        .context("Failed to create input_ids array")?;
    let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())
        .context("Failed to create attention_mask array")?;
    let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
        .context("Failed to create token_type_ids array")?;

    let outputs = session.run(ort::inputs![
        "input_ids" => Value::from_array(input_ids_array)?,
        "attention_mask" => Value::from_array(attention_mask_array)?,
        "token_type_ids" => Value::from_array(token_type_ids_array)?
    ])?;

    // Output names differ between exports, the first output is the one we want
    let output = outputs[0]
        .try_extract_array::<f32>()
        .context("Failed to extract output tensor")?;

    match output.ndim() {
        3 => {
            let hidden = output
                .into_dimensionality::<Ix3>()
                .context("Failed to view output as [batch, seq_len, hidden]")?;
            Ok(mean_pool(hidden.index_axis(Axis(0), 0), &attention_mask))
        }
        2 => Ok(output.index_axis(Axis(0), 0).iter().copied().collect()),
        _ => anyhow::bail!(
            "Model outputs unexpected dimensions: {:?} (expected [batch, seq_len, hidden])",
            output.shape()
        ),
    }
}

/// Averages token embeddings `[seq_len, hidden]`, weighted by the attention mask
pub(crate) fn mean_pool(token_embeddings: ArrayView2<'_, f32>, attention_mask: &[i64]) -> Vec<f32> {
    let hidden_dim = token_embeddings.ncols();
    let mut pooled = vec![0.0f32; hidden_dim];
    let mut sum_mask = 0.0f32;

    for (row, &mask) in token_embeddings.outer_iter().zip(attention_mask) {
        let mask_value = mask as f32;
        sum_mask += mask_value;
        for (acc, value) in pooled.iter_mut().zip(row.iter()) {
            *acc += value * mask_value;
        }
    }

    for val in &mut pooled {
        *val /= sum_mask.max(1e-9);
    }
    debug!("Mean pooled {} tokens into {} dims", sum_mask, hidden_dim);

    pooled
}

/// Scales `vector` to unit length; zero vectors are left untouched
pub(crate) fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}
