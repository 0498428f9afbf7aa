// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding API Module
//!
//! POST /embeddings/encode/ returns the sentence embedding of one text.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::encode_handler;
pub use request::EncodeRequest;
pub use response::EncodeResponse;
