// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the text embedding server

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Endpoints served by this version
pub const ENDPOINTS: &[&str] = &[
    "GET /",
    "GET /info",
    "GET /health",
    "POST /embeddings/encode/",
    "POST /text/truncate/",
    "POST /text/number-of-tokens/",
    "POST /text/chunks/",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Text Embedding Server {}", VERSION_NUMBER)
}
