// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod embeddings;
pub mod version;

pub use api::{create_app, ApiError, AppState};
pub use client::EmbeddingClient;
pub use config::ServerConfig;
pub use embeddings::{
    EmbeddingModelConfig, ModelInfo, OnnxEmbeddingModel, StubTextModel, TextModel,
};
