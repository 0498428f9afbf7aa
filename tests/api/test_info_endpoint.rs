// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /, GET /info and GET /health

use crate::{get, stub_app};
use axum::http::StatusCode;

#[tokio::test]
async fn test_info_reports_model_metadata() {
    let (status, body) = get(stub_app(1024), "/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "stub-whitespace");
    assert_eq!(body["embedding size"], 1024);
    assert_eq!(body["sequence limit"], 512);
    assert_eq!(body.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_root_matches_info() {
    let (root_status, root) = get(stub_app(16), "/").await;
    let (info_status, info) = get(stub_app(16), "/info").await;

    assert_eq!(root_status, StatusCode::OK);
    assert_eq!(info_status, StatusCode::OK);
    assert_eq!(root, info);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(stub_app(16), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "stub-whitespace");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(stub_app(16), "/v1/embed").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
