// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

use crate::spawn_stub_server;
use text_embedding_server::client::EmbeddingClient;

#[tokio::test]
async fn test_info_round_trip() {
    let url = spawn_stub_server(1024).await;
    let client = EmbeddingClient::new(&url).unwrap();

    let info = client.info().await.expect("info should succeed");
    assert_eq!(info.model, "stub-whitespace");
    assert_eq!(info.embedding_size, 1024);
    assert_eq!(info.sequence_limit, 512);
}

#[tokio::test]
async fn test_demo_sequence() {
    let url = spawn_stub_server(1024).await;
    let client = EmbeddingClient::new(&format!("{}/", url)).unwrap();
    let text = "Hello, how are you?";

    assert_eq!(client.number_of_tokens(text).await, Some(6));

    let embedding = client.embedding(text).await.unwrap();
    assert_eq!(embedding.len(), 1024);

    assert_eq!(client.truncate(text, 2).await.as_deref(), Some("Hello"));
    assert_eq!(
        client.chunks(text, 2).await,
        Some(vec![
            "Hello".to_string(),
            ", how".to_string(),
            "are you".to_string(),
            "?".to_string(),
        ])
    );
}

#[tokio::test]
async fn test_rejected_request_yields_none() {
    let url = spawn_stub_server(8).await;
    let client = EmbeddingClient::new(&url).unwrap();

    assert!(client.truncate("hello", 0).await.is_none());
    assert!(client.chunks("hello", -3).await.is_none());
    assert!(client.embedding("").await.is_none());

    // Server keeps serving after client errors
    assert_eq!(client.number_of_tokens("hello").await, Some(1));
}

#[tokio::test]
async fn test_wrong_base_path_yields_none() {
    let url = spawn_stub_server(8).await;
    let client = EmbeddingClient::new(&format!("{}/v2", url)).unwrap();

    assert!(client.info().await.is_none());
    assert!(client.number_of_tokens("hello").await.is_none());
}
