// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embed;
pub mod errors;
pub mod http_server;
pub mod info;
pub mod text;
pub mod validation;

pub use embed::{encode_handler, EncodeRequest, EncodeResponse};
pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, create_app_with_body_limit, start_server, AppState};
pub use info::HealthResponse;
pub use text::{
    ChunksRequest, ChunksResponse, NumberOfTokensRequest, NumberOfTokensResponse,
    TruncateRequest, TruncateResponse,
};
