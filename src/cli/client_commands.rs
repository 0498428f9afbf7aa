// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;

use crate::client::EmbeddingClient;
use crate::config::DEFAULT_SERVER_URL;

const DEMO_TEXT: &str = "Hello, how are you?";

/// Connection arguments shared by the client commands
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Base URL of a running server
    #[arg(long, env = "SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,
}

/// Arguments for commands taking only a text
#[derive(Args, Debug, Clone)]
pub struct TextArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    /// Input text
    pub text: String,
}

/// Arguments for commands taking a text and a token bound
#[derive(Args, Debug, Clone)]
pub struct BoundedTextArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    /// Token bound (validated by the server)
    #[arg(long, allow_negative_numbers = true)]
    pub max_tokens: i64,

    /// Input text
    pub text: String,
}

fn connect(args: &ClientArgs) -> Result<EmbeddingClient> {
    EmbeddingClient::new(&args.server_url)
}

fn require<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("{} request failed", what))
}

pub async fn info(args: ClientArgs) -> Result<()> {
    let client = connect(&args)?;
    let info = require(client.info().await, "info")?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

pub async fn count(args: TextArgs) -> Result<()> {
    let client = connect(&args.client)?;
    let count = require(client.number_of_tokens(&args.text).await, "number-of-tokens")?;
    println!("{}", count);
    Ok(())
}

pub async fn encode(args: TextArgs) -> Result<()> {
    let client = connect(&args.client)?;
    let embedding = require(client.embedding(&args.text).await, "encode")?;
    println!("{}", serde_json::to_string(&embedding)?);
    Ok(())
}

pub async fn truncate(args: BoundedTextArgs) -> Result<()> {
    let client = connect(&args.client)?;
    let text = require(client.truncate(&args.text, args.max_tokens).await, "truncate")?;
    println!("{}", text);
    Ok(())
}

pub async fn chunk(args: BoundedTextArgs) -> Result<()> {
    let client = connect(&args.client)?;
    let chunks = require(client.chunks(&args.text, args.max_tokens).await, "chunks")?;
    for chunk in chunks {
        println!("{}", chunk);
    }
    Ok(())
}

/// Walks every endpoint once with a short sample text
///
/// Individual failures are already logged by the client; the walk keeps
/// going so one broken endpoint does not hide the others.
pub async fn demo(args: ClientArgs) -> Result<()> {
    let client = connect(&args)?;

    if let Some(info) = client.info().await {
        println!("{:?}", info);
    }

    if let Some(count) = client.number_of_tokens(DEMO_TEXT).await {
        println!("number of tokens for text: {}", count);
    }

    if let Some(embedding) = client.embedding(DEMO_TEXT).await {
        println!("Embedding array shape: ({},)", embedding.len());
        let preview: Vec<f32> = embedding.iter().take(8).copied().collect();
        println!("Embeddings: {:?} ...", preview);
    }

    if let Some(truncated) = client.truncate(DEMO_TEXT, 2).await {
        println!("Truncated text to 2 tokens: {}", truncated);
    }

    if let Some(chunks) = client.chunks(DEMO_TEXT, 2).await {
        println!("got {} back", chunks.len());
        for chunk in chunks {
            println!("{}", chunk);
        }
    }

    Ok(())
}
