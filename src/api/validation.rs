// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Field constraints shared by the request types

use crate::api::ApiError;
use std::num::NonZeroUsize;

/// `text` must contain at least one character
pub fn require_text(field: &str, text: &str) -> Result<(), ApiError> {
    if text.is_empty() {
        return Err(ApiError::validation(
            field,
            format!("{} must be at least 1 character", field),
        ));
    }
    Ok(())
}

/// Token bounds must be strictly positive
pub fn require_positive(field: &str, value: i64) -> Result<NonZeroUsize, ApiError> {
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            ApiError::validation(
                field,
                format!("{} must be greater than 0 (got {})", field, value),
            )
        })
}
