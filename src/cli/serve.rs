// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::api::{start_server, AppState};
use crate::version::ENDPOINTS;
use crate::config::{ServerConfig, DEFAULT_HOST, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT};
use crate::embeddings::{
    load_model, EmbeddingModelConfig, TextModel, DEFAULT_MODEL_ID, DEFAULT_SEQUENCE_LIMIT,
};

/// Arguments for the serve command
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Largest accepted request body in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Model identifier, also the HuggingFace repository to fetch from
    #[arg(long, env = "MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// Local ONNX model file (fetched from the Hub when omitted)
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Local tokenizer.json (fetched from the Hub when omitted)
    #[arg(long, env = "TOKENIZER_PATH")]
    pub tokenizer_path: Option<PathBuf>,

    /// ONNX graph path inside the Hub repository
    #[arg(long, env = "ONNX_FILE", default_value = "onnx/model.onnx")]
    pub onnx_file: String,

    /// HuggingFace cache directory
    #[arg(long, env = "HF_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Sequence limit reported by /info and applied to encode inputs
    #[arg(long, env = "MAX_SEQUENCE_LENGTH", default_value_t = DEFAULT_SEQUENCE_LIMIT)]
    pub max_sequence_length: usize,

    /// L2-normalize embeddings
    #[arg(
        long,
        env = "NORMALIZE_EMBEDDINGS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub normalize: bool,

    /// ONNX Runtime intra-op threads
    #[arg(long, env = "INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn model_config(&self) -> EmbeddingModelConfig {
        EmbeddingModelConfig {
            name: self.model_id.clone(),
            model_path: self.model_path.clone(),
            tokenizer_path: self.tokenizer_path.clone(),
            onnx_file: self.onnx_file.clone(),
            cache_dir: self.cache_dir.clone(),
            max_sequence_length: self.max_sequence_length,
            normalize: self.normalize,
            intra_threads: self.intra_threads,
        }
    }
}

/// Loads the model, then serves until shutdown
///
/// The model is fully loaded before the listener binds, so the first
/// accepted request already sees it.
pub async fn serve(args: ServeArgs) -> Result<()> {
    let server_config = args.server_config();
    server_config.validate()?;

    info!("🧠 Loading embedding model {}...", args.model_id);
    let model = load_model(&args.model_config()).await?;
    let model: Arc<dyn TextModel> = Arc::new(model);

    let model_info = model.info();
    info!(
        "✅ Model ready: {} ({} dimensions, sequence limit {})",
        model_info.model, model_info.embedding_size, model_info.sequence_limit
    );

    info!("API Endpoints:");
    for endpoint in ENDPOINTS {
        info!("  {}", endpoint);
    }

    start_server(&server_config, AppState::new(model)).await
}
