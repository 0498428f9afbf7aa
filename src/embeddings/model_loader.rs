// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding model loading
//!
//! Resolves the ONNX graph and tokenizer for the configured model, either
//! from explicit local paths or from the HuggingFace Hub cache, then builds
//! the [`OnnxEmbeddingModel`] once at startup.

use super::{OnnxEmbeddingModel, OnnxModelSettings, DEFAULT_MODEL_ID, DEFAULT_SEQUENCE_LIMIT};
use anyhow::{Context, Result};
use hf_hub::api::tokio::ApiBuilder;
use std::path::PathBuf;
use tracing::{error, info};

/// Configuration for loading an embedding model
#[derive(Debug, Clone)]
pub struct EmbeddingModelConfig {
    /// Model name, also the HuggingFace repository id (e.g., "intfloat/e5-large-v2")
    pub name: String,
    /// Local ONNX model file; fetched from the Hub when `None`
    pub model_path: Option<PathBuf>,
    /// Local tokenizer JSON file; fetched from the Hub when `None`
    pub tokenizer_path: Option<PathBuf>,
    /// Path of the ONNX graph inside the Hub repository
    pub onnx_file: String,
    /// Hub cache directory; the hf-hub default when `None`
    pub cache_dir: Option<PathBuf>,
    /// Sequence limit reported by info and applied to encode inputs
    pub max_sequence_length: usize,
    /// L2-normalize embeddings after pooling
    pub normalize: bool,
    /// ONNX Runtime intra-op threads
    pub intra_threads: usize,
}

impl Default for EmbeddingModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL_ID.to_string(),
            model_path: None,
            tokenizer_path: None,
            onnx_file: "onnx/model.onnx".to_string(),
            cache_dir: None,
            max_sequence_length: DEFAULT_SEQUENCE_LIMIT,
            normalize: true,
            intra_threads: 4,
        }
    }
}

impl EmbeddingModelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Model name cannot be empty");
        }
        if self.max_sequence_length == 0 {
            anyhow::bail!("Maximum sequence length must be greater than 0");
        }
        if self.intra_threads == 0 {
            anyhow::bail!("Intra-op thread count must be greater than 0");
        }
        Ok(())
    }

    fn settings(&self) -> OnnxModelSettings {
        OnnxModelSettings {
            max_length: self.max_sequence_length,
            normalize: self.normalize,
            intra_threads: self.intra_threads,
        }
    }
}

/// Loads the model described by `config`
///
/// Hub downloads are async; session creation is blocking and runs on the
/// blocking pool. Fails if either file cannot be resolved or the model
/// does not load.
pub async fn load_model(config: &EmbeddingModelConfig) -> Result<OnnxEmbeddingModel> {
    config.validate()?;
    let (model_path, tokenizer_path) = resolve_model_files(config).await?;

    info!(
        "Loading embedding model {} from {}",
        config.name,
        model_path.display()
    );

    let name = config.name.clone();
    let settings = config.settings();
    let result = tokio::task::spawn_blocking(move || {
        OnnxEmbeddingModel::new(name, model_path, tokenizer_path, settings)
    })
    .await
    .context("Model loading task panicked")?;

    match result {
        Ok(model) => {
            info!(
                "✓ Successfully loaded model: {} ({} dimensions)",
                model.model_name(),
                model.dimension()
            );
            Ok(model)
        }
        Err(e) => {
            error!("✗ Failed to load model {}: {:#}", config.name, e);
            Err(e)
        }
    }
}

async fn resolve_model_files(config: &EmbeddingModelConfig) -> Result<(PathBuf, PathBuf)> {
    if let (Some(model), Some(tokenizer)) = (&config.model_path, &config.tokenizer_path) {
        return Ok((model.clone(), tokenizer.clone()));
    }

    let mut builder = ApiBuilder::new().with_progress(false);
    if let Some(cache_dir) = &config.cache_dir {
        builder = builder.with_cache_dir(cache_dir.clone());
    }
    let api = builder
        .build()
        .context("Failed to initialise HuggingFace Hub client")?;
    let repo = api.model(config.name.clone());

    let model_path = match &config.model_path {
        Some(path) => path.clone(),
        None => {
            info!("Fetching {}/{} from HuggingFace Hub", config.name, config.onnx_file);
            repo.get(&config.onnx_file)
                .await
                .with_context(|| format!("Failed to fetch {} for {}", config.onnx_file, config.name))?
        }
    };

    let tokenizer_path = match &config.tokenizer_path {
        Some(path) => path.clone(),
        None => {
            info!("Fetching {}/tokenizer.json from HuggingFace Hub", config.name);
            repo.get("tokenizer.json")
                .await
                .with_context(|| format!("Failed to fetch tokenizer.json for {}", config.name))?
        }
    };

    Ok((model_path, tokenizer_path))
}
