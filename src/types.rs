// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The vocabulary-facing types: modes, thresholds, configuration and results.
//!
//! # Invariants
//!
//! - **Threshold**: fixed thresholds never exceed [`MAX_THRESHOLD`]. The
//!   dynamic schedule tops out at the same value.
//! - **IndexConfig**: `truncate_length ≥ 1`, and the bit-parallel engine only
//!   pairs with the plain edit distance (modes 1 and 2).
//! - **ClosestWords**: matches are ordered by distance, ties in the order the
//!   candidates were discovered.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Largest threshold any mode supports.
pub const MAX_THRESHOLD: u32 = 3;

/// Longest query accepted in full word matching. Truncated and completion
/// matching clamp longer queries to this many symbols instead.
pub const MAX_WORD_LEN: usize = 45;

/// Default prefix length for the truncated and completion modes.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 7;

/// The threshold a query of `len` symbols gets under the dynamic schedule.
#[inline]
pub fn dynamic_threshold(len: usize) -> u32 {
    if len <= 5 {
        1
    } else if len <= 10 {
        2
    } else {
        3
    }
}

// =============================================================================
// MODE
// =============================================================================

/// What gets indexed, and therefore which distance decides a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Index whole words, match by edit distance.
    WordMatchingFull = 1,
    /// Index the first `truncate_length` symbols, match by edit distance.
    WordMatchingTruncated = 2,
    /// Index every prefix up to `truncate_length`, match by extension distance.
    CompletionMatching = 3,
}

impl Mode {
    /// Numeric code used in the file format.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Distance a match under this mode is measured with.
    pub fn distance_kind(self) -> DistanceKind {
        match self {
            Mode::WordMatchingFull | Mode::WordMatchingTruncated => DistanceKind::Edit,
            Mode::CompletionMatching => DistanceKind::Extension,
        }
    }

    pub fn is_completion(self) -> bool {
        matches!(self, Mode::CompletionMatching)
    }

    pub fn is_truncated(self) -> bool {
        !matches!(self, Mode::WordMatchingFull)
    }
}

impl TryFrom<i64> for Mode {
    type Error = FuzzyError;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Mode::WordMatchingFull),
            2 => Ok(Mode::WordMatchingTruncated),
            3 => Ok(Mode::CompletionMatching),
            other => Err(FuzzyError::UnknownMode(other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::WordMatchingFull => "word matching (full)",
            Mode::WordMatchingTruncated => "word matching (truncated)",
            Mode::CompletionMatching => "completion matching",
        };
        f.write_str(name)
    }
}

/// Distance codes of the search-algorithm contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceKind {
    Edit = 0,
    NormalizedEdit = 1,
    Extension = 2,
    NormalizedExtension = 3,
}

impl DistanceKind {
    pub fn code(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// THRESHOLD
// =============================================================================

/// Maximum distance a match may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    /// 1, 2 or 3 depending on the query length.
    #[default]
    Dynamic,
    /// The same threshold for every query.
    Fixed(u32),
}

impl Threshold {
    /// Validated fixed threshold.
    pub fn fixed(k: u32) -> Result<Self> {
        if k > MAX_THRESHOLD {
            return Err(FuzzyError::UnsupportedThreshold {
                threshold: k,
                max: MAX_THRESHOLD,
            });
        }
        Ok(Threshold::Fixed(k))
    }

    /// Threshold applied to a query of `len` symbols.
    #[inline]
    pub fn for_query(self, len: usize) -> u32 {
        match self {
            Threshold::Fixed(k) => k,
            Threshold::Dynamic => dynamic_threshold(len),
        }
    }

    /// Deletion depth needed on the vocabulary side for a word of `len`
    /// symbols.
    ///
    /// Under the dynamic schedule a query can only match a word of length
    /// `len` if it is at most `t` symbols longer, where `t` is its own
    /// threshold. So the deepest useful depth is the largest `t` with
    /// `dynamic(len + t) ≥ t`.
    pub fn index_depth(self, len: usize) -> u32 {
        match self {
            Threshold::Fixed(k) => k,
            Threshold::Dynamic => (1..=MAX_THRESHOLD)
                .rev()
                .find(|&t| dynamic_threshold(len + t as usize) >= t)
                .unwrap_or(1),
        }
    }

    /// Value stored on line 2 of an index file.
    pub fn to_file_value(self) -> f64 {
        match self {
            Threshold::Fixed(k) => f64::from(k),
            Threshold::Dynamic => -1.0,
        }
    }

    /// Inverse of [`Threshold::to_file_value`]. Any negative value means dynamic.
    pub fn from_file_value(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(FuzzyError::InvalidConfig(format!(
                "threshold {value} is not a number"
            )));
        }
        if value < 0.0 {
            return Ok(Threshold::Dynamic);
        }
        if value.fract() != 0.0 {
            return Err(FuzzyError::InvalidConfig(format!(
                "threshold {value} is not a whole number"
            )));
        }
        if value > f64::from(MAX_THRESHOLD) {
            return Err(FuzzyError::UnsupportedThreshold {
                threshold: value as u32,
                max: MAX_THRESHOLD,
            });
        }
        Ok(Threshold::Fixed(value as u32))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Fixed(k) => write!(f, "{k}"),
            Threshold::Dynamic => f.write_str("dynamic"),
        }
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// How candidates are verified in the word matching modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceEngine {
    /// Bit-parallel for edit distance, dynamic programming for extension.
    #[default]
    Auto,
    /// Bounded dynamic programming with prefix row reuse.
    DynamicProgramming,
    /// Myers bit-vector edit distance. Edit distance only.
    BitParallel,
}

/// Everything that shapes an index before it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub mode: Mode,
    pub threshold: Threshold,
    pub truncate_length: usize,
    pub distance_engine: DistanceEngine,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            mode: Mode::WordMatchingTruncated,
            threshold: Threshold::Dynamic,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            distance_engine: DistanceEngine::Auto,
        }
    }
}

impl IndexConfig {
    pub fn new(mode: Mode, threshold: Threshold) -> Self {
        Self {
            mode,
            threshold,
            ..Self::default()
        }
    }

    pub fn with_truncate_length(mut self, truncate_length: usize) -> Self {
        self.truncate_length = truncate_length;
        self
    }

    pub fn with_distance_engine(mut self, engine: DistanceEngine) -> Self {
        self.distance_engine = engine;
        self
    }

    /// Reject combinations that cannot be built.
    pub fn validate(&self) -> Result<()> {
        if let Threshold::Fixed(k) = self.threshold {
            if k > MAX_THRESHOLD {
                return Err(FuzzyError::UnsupportedThreshold {
                    threshold: k,
                    max: MAX_THRESHOLD,
                });
            }
        }
        if self.truncate_length == 0 {
            return Err(FuzzyError::InvalidConfig(
                "truncate length must be at least 1".into(),
            ));
        }
        if self.mode.is_completion() && self.distance_engine == DistanceEngine::BitParallel {
            return Err(FuzzyError::UnsupportedCombination {
                mode: self.mode,
                engine: self.distance_engine,
            });
        }
        Ok(())
    }

    /// Load a JSON configuration.
    #[cfg(feature = "serde_json")]
    pub fn from_json(text: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// One vocabulary word within threshold of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub word_id: u32,
    pub distance: u32,
}

/// Result of one lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosestWords {
    /// Whether the exact query is itself a vocabulary word.
    pub in_vocabulary: bool,
    pub matches: Vec<Match>,
}

impl ClosestWords {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn word_ids(&self) -> Vec<u32> {
        self.matches.iter().map(|m| m.word_id).collect()
    }

    pub fn distances(&self) -> Vec<u32> {
        self.matches.iter().map(|m| m.distance).collect()
    }
}

/// Detected ordering of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VocabularyOrder {
    #[default]
    Ascending,
    Descending,
    Unsorted,
}

impl VocabularyOrder {
    pub fn detect<S: Ord>(words: &[Vec<S>]) -> Self {
        if words.windows(2).all(|w| w[0] <= w[1]) {
            VocabularyOrder::Ascending
        } else if words.windows(2).all(|w| w[0] >= w[1]) {
            VocabularyOrder::Descending
        } else {
            VocabularyOrder::Unsorted
        }
    }
}

/// Where the builder is. Observable for progress reporting and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildPhase {
    #[default]
    Idle,
    CountingPrefixes,
    CountingSpace,
    Indexing,
    Ready,
}

/// Shape of a built index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub words: usize,
    pub prefix_ranges: usize,
    pub entries: usize,
    pub postings: usize,
    /// Entries whose posting list holds a single range.
    pub single_posting_entries: usize,
    /// Sum of all key lengths.
    pub key_symbols: usize,
}

/// Counters for one lookup, reset at the start of every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStats {
    pub probes: usize,
    pub candidates: usize,
    pub length_filtered: usize,
    pub letter_filtered: usize,
    pub shortcut_hits: usize,
    pub short_query_checks: usize,
    pub distance_computations: usize,
}
