// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Token-window arithmetic: truncation and fixed-size chunking
//!
//! The slice functions work on plain token sequences and never touch a
//! model. `truncate_text` and `chunk_text` compose them with a
//! [`TextModel`]: tokenize in encode mode, slice, detokenize with special
//! tokens skipped.
//!
//! Detokenized output is whatever the tokenizer produces for the retained
//! tokens. WordPiece tokenizers lowercase and re-space text, so the result
//! is not guaranteed to be a byte-for-byte prefix of the input.

use super::TextModel;
use anyhow::Result;
use std::num::NonZeroUsize;
use tracing::debug;

/// Returns the first `max_tokens` tokens, or all of them if the sequence is shorter
pub fn truncate_tokens(tokens: &[u32], max_tokens: NonZeroUsize) -> &[u32] {
    let end = tokens.len().min(max_tokens.get());
    &tokens[..end]
}

/// Splits `tokens` into contiguous, non-overlapping windows of `max_tokens`
///
/// Yields `ceil(len / max_tokens)` slices; only the last one may be
/// shorter. Concatenating the slices gives back `tokens` unchanged.
pub fn chunk_tokens(tokens: &[u32], max_tokens: NonZeroUsize) -> Vec<&[u32]> {
    tokens.chunks(max_tokens.get()).collect()
}

/// Truncates `text` to at most `max_tokens` tokens
pub fn truncate_text<M>(model: &M, text: &str, max_tokens: NonZeroUsize) -> Result<String>
where
    M: TextModel + ?Sized,
{
    let tokens = model.tokenize(text)?;
    let kept = truncate_tokens(&tokens, max_tokens);
    debug!(
        "Truncating {} tokens to {} (limit {})",
        tokens.len(),
        kept.len(),
        max_tokens
    );
    model.detokenize(kept)
}

/// Splits `text` into chunks of at most `max_tokens` tokens each
pub fn chunk_text<M>(model: &M, text: &str, max_tokens: NonZeroUsize) -> Result<Vec<String>>
where
    M: TextModel + ?Sized,
{
    let tokens = model.tokenize(text)?;
    let windows = chunk_tokens(&tokens, max_tokens);
    debug!(
        "Chunking {} tokens into {} chunks of up to {}",
        tokens.len(),
        windows.len(),
        max_tokens
    );
    windows
        .into_iter()
        .map(|window| model.detokenize(window))
        .collect()
}
