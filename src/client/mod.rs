// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the embedding server
//!
//! Every call returns `None` on failure after logging it: non-2xx status,
//! transport error or an unexpected body. Nothing is retried.

use crate::api::{
    ChunksRequest, ChunksResponse, EncodeRequest, EncodeResponse, NumberOfTokensRequest,
    NumberOfTokensResponse, TruncateRequest, TruncateResponse,
};
use crate::embeddings::ModelInfo;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Error: {status}")]
    Status { status: StatusCode, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for a running embedding server
pub struct EmbeddingClient {
    client: Client,
    base_url: String,
}

impl EmbeddingClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Embedding client configured: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /info
    pub async fn info(&self) -> Option<ModelInfo> {
        let url = format!("{}/info", self.base_url);
        let result: Result<ModelInfo, ClientError> = async {
            let response = self.client.get(&url).send().await?;
            Self::read_json::<ModelInfo>(response).await
        }
        .await;
        Self::log_failure(&url, result)
    }

    /// POST /text/number-of-tokens/
    pub async fn number_of_tokens(&self, text: &str) -> Option<usize> {
        let payload = NumberOfTokensRequest {
            text: text.to_string(),
        };
        self.post::<_, NumberOfTokensResponse>("/text/number-of-tokens/", &payload)
            .await
            .map(|resp| resp.number_of_tokens)
    }

    /// POST /embeddings/encode/, decoded into a vector
    pub async fn embedding(&self, text: &str) -> Option<Vec<f32>> {
        let payload = EncodeRequest {
            text: text.to_string(),
        };
        self.post::<_, EncodeResponse>("/embeddings/encode/", &payload)
            .await
            .map(|resp| resp.embeddings)
    }

    /// POST /text/truncate/
    pub async fn truncate(&self, text: &str, max_tokens: i64) -> Option<String> {
        let payload = TruncateRequest {
            text: text.to_string(),
            max_tokens,
        };
        let resp = self
            .post::<_, TruncateResponse>("/text/truncate/", &payload)
            .await?;
        debug!("Truncate response: {:?}", resp);
        Some(resp.truncated_text)
    }

    /// POST /text/chunks/
    pub async fn chunks(&self, text: &str, max_tokens: i64) -> Option<Vec<String>> {
        let payload = ChunksRequest {
            text: text.to_string(),
            max_tokens,
        };
        let resp = self.post::<_, ChunksResponse>("/text/chunks/", &payload).await?;
        debug!("Chunks response: {:?}", resp);
        Some(resp.text_in_chunks)
    }

    async fn post<B, R>(&self, path: &str, payload: &B) -> Option<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let result: Result<R, ClientError> = async {
            let response = self.client.post(&url).json(payload).send().await?;
            Self::read_json::<R>(response).await
        }
        .await;
        Self::log_failure(&url, result)
    }

    async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(response.json::<R>().await?)
    }

    fn log_failure<R>(url: &str, result: Result<R, ClientError>) -> Option<R> {
        match result {
            Ok(value) => Some(value),
            Err(ClientError::Status { status, body }) => {
                error!("Error: {} from {} ({})", status.as_u16(), url, body);
                None
            }
            Err(e) => {
                error!("{} ({})", e, url);
                None
            }
        }
    }
}
