// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Error paths: every malformed request is a client error with a JSON body

use crate::{post_json, send, stub_app};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use text_embedding_server::api::{create_app_with_body_limit, AppState};
use text_embedding_server::embeddings::StubTextModel;

#[tokio::test]
async fn test_truncate_empty_text_rejected() {
    let (status, body) = post_json(
        stub_app(8),
        "/text/truncate/",
        json!({"text": "", "max_tokens": 5}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["field"], "text");
}

#[tokio::test]
async fn test_truncate_zero_bound_rejected() {
    let (status, body) = post_json(
        stub_app(8),
        "/text/truncate/",
        json!({"text": "hello", "max_tokens": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["field"], "max_tokens");
}

#[tokio::test]
async fn test_negative_bounds_rejected() {
    for uri in ["/text/truncate/", "/text/chunks/"] {
        let (status, body) =
            post_json(stub_app(8), uri, json!({"text": "hello", "max_tokens": -4})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body["error_type"], "validation_error", "{}", uri);
    }
}

#[tokio::test]
async fn test_missing_bound_rejected() {
    let (status, _) = post_json(stub_app(8), "/text/chunks/", json!({"text": "hello"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_non_integer_bound_rejected() {
    let (status, _) = post_json(
        stub_app(8),
        "/text/chunks/",
        json!({"text": "hello", "max_tokens": "two"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/text/number-of-tokens/")
        .header("content-type", "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();

    let (status, body) = send(stub_app(8), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/embeddings/encode/")
        .body(Body::from(r#"{"text": "hello"}"#))
        .unwrap();

    let (status, body) = send(stub_app(8), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error_type"], "unsupported_media_type");
}

#[tokio::test]
async fn test_get_on_post_route_is_405() {
    let request = Request::builder()
        .method("GET")
        .uri("/text/chunks/")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(stub_app(8), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_body_over_limit_is_413() {
    let app = create_app_with_body_limit(
        AppState::new(Arc::new(StubTextModel::with_dimension(8))),
        1024,
    );
    let (status, body) = post_json(
        app,
        "/text/chunks/",
        json!({"text": "word ".repeat(1000), "max_tokens": 16}),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error_type"], "payload_too_large");
}
