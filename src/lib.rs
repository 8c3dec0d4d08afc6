// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy word lookup over a fixed vocabulary with a FastSS deletion index.
//!
//! Every vocabulary word is expanded into the strings reachable by deleting
//! up to `k` symbols. A query is expanded the same way, and any word sharing a
//! deletion string with it is a candidate. Candidates are filtered and then
//! verified with a bounded edit distance, so the result is exactly the set of
//! words within threshold, without scanning the vocabulary.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  types.rs   │────▶│     index/       │────▶│     search/      │
//! │ (Mode,      │     │ (prefix ranges,  │     │ (probe, filters, │
//! │  Threshold) │     │  deletion map)   │     │  verification)   │
//! └─────────────┘     └──────────────────┘     └──────────────────┘
//!        │                     │                        │
//!        ▼                     ▼                        ▼
//! ┌──────────────┐    ┌──────────────────┐     ┌──────────────────┐
//! │  symbol.rs   │    │     format/      │     │     fuzzy/       │
//! │ (u8, char)   │    │ (index files)    │     │ (distance        │
//! └──────────────┘    └──────────────────┘     │  kernels)        │
//!                                              └──────────────────┘
//! ```
//!
//! # Modes
//!
//! | Mode                     | Indexed keys                 | Distance  |
//! |--------------------------|------------------------------|-----------|
//! | `WordMatchingFull`       | whole words                  | edit      |
//! | `WordMatchingTruncated`  | first `truncate_length`      | edit      |
//! | `CompletionMatching`     | every prefix up to truncate  | extension |
//!
//! # Usage
//!
//! ```
//! use fastss::{FastSsIndex, IndexConfig, Mode, Threshold};
//!
//! let words: Vec<Vec<u8>> = ["algebra", "algorithm", "logarithm"]
//!     .iter()
//!     .map(|w| w.as_bytes().to_vec())
//!     .collect();
//! let config = IndexConfig::new(Mode::WordMatchingFull, Threshold::Fixed(2));
//! let mut index = FastSsIndex::from_vocabulary(config, words).unwrap();
//!
//! let found = index.find_closest_words(b"algoritm").unwrap();
//! assert_eq!(found.word_ids(), vec![1]);
//! assert_eq!(found.distances(), vec![1]);
//! ```

pub mod algorithm;
mod error;
pub mod format;
pub mod fuzzy;
pub mod index;
pub mod lexicon;
pub mod linear;
pub mod search;
mod symbol;
pub mod testing;
mod types;

pub use algorithm::FuzzySearchAlgorithm;
pub use error::{FuzzyError, Result};
pub use format::{file_fingerprint, IndexHeader};
pub use index::{FastSsIndex, PrefixRange};
pub use lexicon::{normalize, Lexicon, Suggestion};
pub use linear::LinearScan;
pub use search::QueryScratch;
#[cfg(feature = "parallel")]
pub use search::SharedSearcher;
pub use symbol::{words_from_text, Symbol};
pub use types::{
    dynamic_threshold, BuildPhase, ClosestWords, DistanceEngine, DistanceKind, IndexConfig,
    IndexStats, Match, Mode, QueryStats, Threshold, VocabularyOrder, DEFAULT_TRUNCATE_LENGTH,
    MAX_THRESHOLD, MAX_WORD_LEN,
};
