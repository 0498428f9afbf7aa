// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Text API Module
//!
//! Token counting, truncation and token-sized chunking endpoints.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{chunks_handler, number_of_tokens_handler, truncate_handler};
pub use request::{ChunksRequest, NumberOfTokensRequest, TruncateRequest};
pub use response::{ChunksResponse, NumberOfTokensResponse, TruncateResponse};
