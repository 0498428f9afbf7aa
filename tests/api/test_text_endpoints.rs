// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for POST /text/truncate/, /text/number-of-tokens/ and /text/chunks/
//!
//! The stub model tokenizes "Hello, how are you?" as
//! `[CLS] Hello , how are you ? [SEP]` and detokenizes by joining pieces
//! with single spaces.

use crate::{post_json, stub_app};
use axum::http::StatusCode;
use serde_json::json;

const TEXT: &str = "Hello, how are you?";

fn strings(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_number_of_tokens_excludes_special_tokens() {
    let (status, body) =
        post_json(stub_app(8), "/text/number-of-tokens/", json!({"text": TEXT})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["number_of_tokens"], 6);
}

#[tokio::test]
async fn test_number_of_tokens_at_least_one() {
    for text in ["a", "?", "word", "many words here"] {
        let (status, body) =
            post_json(stub_app(8), "/text/number-of-tokens/", json!({"text": text})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["number_of_tokens"].as_u64().unwrap() >= 1, "text {:?}", text);
    }
}

#[tokio::test]
async fn test_truncate_to_two_tokens() {
    let (status, body) = post_json(
        stub_app(8),
        "/text/truncate/",
        json!({"text": TEXT, "max_tokens": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // [CLS] Hello
    assert_eq!(body["truncated_text"], "Hello");
}

#[tokio::test]
async fn test_truncate_beyond_length_returns_full_detokenization() {
    let app = stub_app(8);
    let (status, body) = post_json(
        app.clone(),
        "/text/truncate/",
        json!({"text": TEXT, "max_tokens": 512}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let full = body["truncated_text"].as_str().unwrap().to_string();
    // Tokenizer normalization: not byte-identical to the input
    assert_eq!(full, "Hello , how are you ?");

    let (_, again) = post_json(
        app,
        "/text/truncate/",
        json!({"text": full, "max_tokens": 1000}),
    )
    .await;
    assert_eq!(again["truncated_text"], full.as_str());
}

#[tokio::test]
async fn test_chunks_of_two_tokens() {
    let (status, body) = post_json(
        stub_app(8),
        "/text/chunks/",
        json!({"text": TEXT, "max_tokens": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 8 tokens -> ceil(8 / 2) = 4 chunks
    assert_eq!(
        strings(&body["text_in_chunks"]),
        vec!["Hello", ", how", "are you", "?"]
    );
}

#[tokio::test]
async fn test_chunk_count_is_ceiling_of_token_count() {
    let text = "one two three four five six seven";
    // 7 words + [CLS] + [SEP]
    let total_tokens: usize = 9;

    for size in 1..=10usize {
        let (status, body) = post_json(
            stub_app(8),
            "/text/chunks/",
            json!({"text": text, "max_tokens": size}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let chunks = strings(&body["text_in_chunks"]);
        assert_eq!(chunks.len(), total_tokens.div_ceil(size), "size {}", size);

        // No word lost, duplicated or reordered across chunks
        let rejoined: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.split_whitespace().map(str::to_string))
            .collect();
        assert_eq!(rejoined.join(" "), text, "size {}", size);
    }
}

#[tokio::test]
async fn test_single_chunk_when_bound_exceeds_length() {
    let (status, body) = post_json(
        stub_app(8),
        "/text/chunks/",
        json!({"text": TEXT, "max_tokens": 100}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        strings(&body["text_in_chunks"]),
        vec!["Hello , how are you ?"]
    );
}

#[tokio::test]
async fn test_chunks_accept_multi_megabyte_document() {
    // ~3 MB, above axum's 2 MB extractor default
    let document = "word ".repeat(600_000);
    let (status, body) = post_json(
        stub_app(8),
        "/text/chunks/",
        json!({"text": document, "max_tokens": 512}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 600_000 words + [CLS] + [SEP]
    let chunks = body["text_in_chunks"].as_array().unwrap();
    assert_eq!(chunks.len(), 600_002usize.div_ceil(512));
}

#[tokio::test]
async fn test_routes_answer_without_trailing_slash() {
    let app = stub_app(8);

    let (status, body) = post_json(
        app.clone(),
        "/text/chunks",
        json!({"text": TEXT, "max_tokens": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text_in_chunks"].as_array().unwrap().len(), 4);

    let (status, body) = post_json(
        app.clone(),
        "/text/truncate",
        json!({"text": TEXT, "max_tokens": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["truncated_text"], "Hello");

    let (status, body) =
        post_json(app.clone(), "/text/number-of-tokens", json!({"text": TEXT})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["number_of_tokens"], 6);

    let (status, body) = post_json(app, "/embeddings/encode", json!({"text": TEXT})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["embeddings"].as_array().unwrap().len(), 8);
}
