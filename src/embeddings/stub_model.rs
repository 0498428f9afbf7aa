// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Deterministic in-process model for tests and offline development
//!
//! Splits text into alphanumeric words and single punctuation marks,
//! interns each distinct piece as a token ID, and wraps sequences in
//! `[CLS]` / `[SEP]` like a BERT tokenizer. Embeddings are pseudo-random
//! but stable for a given text.
//!
//! The vocabulary is capped; once full, unseen pieces map to `[UNK]`, which
//! detokenization drops like any other special token.

use super::{ModelInfo, TextModel, DEFAULT_EMBEDDING_SIZE, DEFAULT_SEQUENCE_LIMIT};
use anyhow::{anyhow, Result};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

const CLS_TOKEN: &str = "[CLS]";
const SEP_TOKEN: &str = "[SEP]";
const UNK_TOKEN: &str = "[UNK]";
const CLS_ID: u32 = 0;
const SEP_ID: u32 = 1;
const UNK_ID: u32 = 2;

/// Vocabulary cap, the size of the BERT uncased vocabulary
pub const DEFAULT_STUB_VOCAB_LIMIT: usize = 30522;

#[derive(Debug)]
struct Vocab {
    ids: HashMap<String, u32>,
    pieces: Vec<String>,
    limit: usize,
}

impl Vocab {
    fn with_special_tokens(limit: usize) -> Self {
        let mut vocab = Self {
            ids: HashMap::new(),
            pieces: Vec::new(),
            limit: limit.max(3),
        };
        vocab.intern(CLS_TOKEN);
        vocab.intern(SEP_TOKEN);
        vocab.intern(UNK_TOKEN);
        vocab
    }

    fn intern(&mut self, piece: &str) -> u32 {
        if let Some(&id) = self.ids.get(piece) {
            return id;
        }
        if self.pieces.len() >= self.limit {
            return UNK_ID;
        }
        let id = self.pieces.len() as u32;
        self.pieces.push(piece.to_string());
        self.ids.insert(piece.to_string(), id);
        id
    }
}

/// Whitespace/punctuation model implementing [`TextModel`]
#[derive(Debug)]
pub struct StubTextModel {
    model_name: String,
    dimension: usize,
    sequence_limit: usize,
    vocab: Mutex<Vocab>,
}

impl StubTextModel {
    pub fn new() -> Self {
        Self::with_dimension(DEFAULT_EMBEDDING_SIZE)
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self::with_vocab_limit(dimension, DEFAULT_STUB_VOCAB_LIMIT)
    }

    /// Model whose vocabulary holds at most `vocab_limit` entries, specials included
    pub fn with_vocab_limit(dimension: usize, vocab_limit: usize) -> Self {
        Self {
            model_name: "stub-whitespace".to_string(),
            dimension,
            sequence_limit: DEFAULT_SEQUENCE_LIMIT,
            vocab: Mutex::new(Vocab::with_special_tokens(vocab_limit)),
        }
    }

    /// Number of interned pieces, specials included
    pub fn vocab_size(&self) -> usize {
        self.vocab.lock().map(|v| v.pieces.len()).unwrap_or(0)
    }

    fn pieces(text: &str) -> Vec<&str> {
        let mut pieces = Vec::new();
        let mut word_start: Option<usize> = None;

        for (idx, ch) in text.char_indices() {
            if ch.is_alphanumeric() {
                word_start.get_or_insert(idx);
                continue;
            }
            if let Some(start) = word_start.take() {
                pieces.push(&text[start..idx]);
            }
            if !ch.is_whitespace() {
                pieces.push(&text[idx..idx + ch.len_utf8()]);
            }
        }
        if let Some(start) = word_start {
            pieces.push(&text[start..]);
        }

        pieces
    }
}

impl Default for StubTextModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TextModel for StubTextModel {
    fn info(&self) -> ModelInfo {
        ModelInfo {
            model: self.model_name.clone(),
            embedding_size: self.dimension,
            sequence_limit: self.sequence_limit,
        }
    }

    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        let mut vocab = self
            .vocab
            .lock()
            .map_err(|_| anyhow!("Stub vocabulary lock poisoned"))?;

        let mut tokens = vec![CLS_ID];
        tokens.extend(Self::pieces(text).into_iter().map(|p| vocab.intern(p)));
        tokens.push(SEP_ID);
        Ok(tokens)
    }

    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(Self::pieces(text).len())
    }

    fn detokenize(&self, tokens: &[u32]) -> Result<String> {
        let vocab = self
            .vocab
            .lock()
            .map_err(|_| anyhow!("Stub vocabulary lock poisoned"))?;

        let mut words = Vec::with_capacity(tokens.len());
        for &id in tokens {
            if id == CLS_ID || id == SEP_ID || id == UNK_ID {
                continue;
            }
            let piece = vocab
                .pieces
                .get(id as usize)
                .ok_or_else(|| anyhow!("Unknown token id: {}", id))?;
            words.push(piece.as_str());
        }
        Ok(words.join(" "))
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut current_seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            // Linear congruential step, mapped to [-1, 1]
            current_seed =
                (current_seed.wrapping_mul(1664525).wrapping_add(1013904223)) ^ (i as u64);
            let value = (current_seed as f64 / u64::MAX as f64) * 2.0 - 1.0;
            embedding.push(value as f32);
        }

        super::onnx_model::l2_normalize(&mut embedding);
        Ok(embedding)
    }
}
