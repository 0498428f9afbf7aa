// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Window arithmetic over token sequences and through the stub model

use std::num::NonZeroUsize;
use text_embedding_server::embeddings::{
    chunk_text, chunk_tokens, truncate_text, truncate_tokens, StubTextModel, TextModel,
};

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_chunks_partition_the_sequence() {
    let tokens: Vec<u32> = (0..37).collect();

    for size in [1, 2, 5, 7, 36, 37, 38, 100] {
        let chunks = chunk_tokens(&tokens, nz(size));

        assert_eq!(chunks.len(), tokens.len().div_ceil(size), "size {}", size);
        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= size));
        // All but the last are full
        assert!(chunks[..chunks.len() - 1].iter().all(|c| c.len() == size));
        assert_eq!(chunks.concat(), tokens, "size {}", size);
    }
}

#[test]
fn test_truncate_is_prefix_of_bounded_length() {
    let tokens: Vec<u32> = (100..110).collect();

    for size in 1..=15 {
        let kept = truncate_tokens(&tokens, nz(size));
        assert_eq!(kept.len(), size.min(tokens.len()));
        assert!(tokens.starts_with(kept));
    }
}

#[test]
fn test_first_chunk_equals_truncation() {
    let model = StubTextModel::new();
    let text = "The quick brown fox jumps over the lazy dog.";

    for size in 1..=12 {
        let chunks = chunk_text(&model, text, nz(size)).unwrap();
        let truncated = truncate_text(&model, text, nz(size)).unwrap();
        assert_eq!(chunks[0], truncated, "size {}", size);
    }
}

#[test]
fn test_truncate_idempotent_through_model() {
    let model = StubTextModel::new();
    let once = truncate_text(&model, "Hello, how are you?", nz(4)).unwrap();
    let twice = truncate_text(&model, &once, nz(4)).unwrap();

    assert_eq!(once, "Hello , how");
    assert_eq!(twice, once);
}

#[test]
fn test_count_excludes_specials_tokenize_includes_them() {
    let model = StubTextModel::new();
    let text = "Hello, how are you?";

    assert_eq!(model.count_tokens(text).unwrap(), 6);
    assert_eq!(model.tokenize(text).unwrap().len(), 8);
}
