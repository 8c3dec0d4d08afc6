// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Crate error type.
//!
//! Everything the library can refuse is a variant here. Advisory conditions
//! (empty vocabulary, unsorted vocabulary, clamped queries) are logged, not
//! returned.

use std::io;

use thiserror::Error;

use crate::types::{DistanceEngine, Mode};

/// Errors surfaced by index construction, querying and (de)serialization.
#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("vocabulary has {size} words, the packed prefix range addresses at most {max}")]
    VocabularyTooLarge { size: usize, max: usize },

    #[error("unknown indexing mode {0} (expected 1, 2 or 3)")]
    UnknownMode(i64),

    #[error("threshold {threshold} is not supported (maximum {max})")]
    UnsupportedThreshold { threshold: u32, max: u32 },

    #[error("distance engine {engine:?} cannot be used with {mode:?}")]
    UnsupportedCombination { mode: Mode, engine: DistanceEngine },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed index file at line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    #[error("word {word_id} cannot be serialized: {reason}")]
    UnsupportedWord { word_id: usize, reason: &'static str },

    #[error("query has {len} symbols, full word matching accepts at most {max}")]
    QueryTooLong { len: usize, max: usize },

    #[error("pattern has {len} symbols, the bit-parallel engine handles at most {max}")]
    PatternTooLong { len: usize, max: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[cfg(feature = "serde_json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FuzzyError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        FuzzyError::MalformedIndex {
            line,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FuzzyError>;
