// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The deletion-neighborhood index.
//!
//! Build once, then query many times:
//!
//! ```text
//! vocabulary ──▶ prefix groups ──▶ count pass ──▶ reserve ──▶ insert pass
//!                (prefix_range)    (calc space)                (deletion map)
//! ```
//!
//! The deletion map sends every key in a group's deletion neighborhood to the
//! ids of the groups that produced it. Group ids index `prefix_ranges`, which
//! in turn expand to word ids.

mod build;
pub mod neighborhood;
pub mod prefix_range;

use ahash::AHashMap;

use crate::error::Result;
use crate::search::QueryScratch;
use crate::symbol::Symbol;
use crate::types::{BuildPhase, DistanceKind, IndexConfig, IndexStats, Mode, Threshold, VocabularyOrder};

pub use neighborhood::{for_each_deletion, neighborhood_size};
pub use prefix_range::{
    common_prefix_lengths, PrefixRange, MAX_RUN, MAX_VOCABULARY, RUN_BITS, WORD_ID_BITS,
};

/// Key → ids of the prefix groups whose neighborhoods contain the key.
pub type DeletionMap<S> = AHashMap<Vec<S>, Vec<u32>>;

/// A FastSS index over an owned vocabulary.
#[derive(Debug, Clone)]
pub struct FastSsIndex<S: Symbol> {
    pub(crate) config: IndexConfig,
    pub(crate) vocabulary: Vec<Vec<S>>,
    pub(crate) prefix_ranges: Vec<PrefixRange>,
    pub(crate) deletions: DeletionMap<S>,
    /// Common prefix length of each word with its predecessor.
    pub(crate) prefix_lengths: Vec<usize>,
    pub(crate) order: VocabularyOrder,
    pub(crate) phase: BuildPhase,
    pub(crate) stats: IndexStats,
    pub(crate) fingerprint: Option<u32>,
    pub(crate) show_progress: bool,
    pub(crate) scratch: QueryScratch<S>,
}

impl<S: Symbol> FastSsIndex<S> {
    /// An empty index. Fails if the configuration cannot be built.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            vocabulary: Vec::new(),
            prefix_ranges: Vec::new(),
            deletions: DeletionMap::default(),
            prefix_lengths: Vec::new(),
            order: VocabularyOrder::Ascending,
            phase: BuildPhase::Idle,
            stats: IndexStats::default(),
            fingerprint: None,
            show_progress: false,
            scratch: QueryScratch::default(),
        })
    }

    /// Build an index in one call.
    pub fn from_vocabulary(config: IndexConfig, vocabulary: Vec<Vec<S>>) -> Result<Self> {
        let mut index = Self::new(config)?;
        index.build(vocabulary, true)?;
        Ok(index)
    }

    /// Draw progress bars while building (feature `parallel`).
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn threshold(&self) -> Threshold {
        self.config.threshold
    }

    pub fn distance_kind(&self) -> DistanceKind {
        self.config.mode.distance_kind()
    }

    pub fn truncate_length(&self) -> usize {
        self.config.truncate_length
    }

    pub fn vocabulary(&self) -> &[Vec<S>] {
        &self.vocabulary
    }

    pub fn word(&self, id: u32) -> Option<&[S]> {
        self.vocabulary.get(id as usize).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn prefix_ranges(&self) -> &[PrefixRange] {
        &self.prefix_ranges
    }

    /// Group ids posted under `key`, if any.
    pub fn postings(&self, key: &[S]) -> Option<&[u32]> {
        self.deletions.get(key).map(Vec::as_slice)
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub fn order(&self) -> VocabularyOrder {
        self.order
    }

    /// CRC32 of the file this index was last saved to or loaded from.
    pub fn fingerprint(&self) -> Option<u32> {
        self.fingerprint
    }

    /// Counters of the most recent [`FastSsIndex::find_closest_words`] call.
    pub fn last_query_stats(&self) -> crate::types::QueryStats {
        self.scratch.stats()
    }

    /// Whether `word` is in the vocabulary.
    ///
    /// Binary search in whichever direction the vocabulary is sorted; a linear
    /// scan if it is not sorted at all.
    pub fn in_vocabulary(&self, word: &[S]) -> bool {
        in_vocabulary(&self.vocabulary, self.order, word)
    }

    /// Deletion map entries with keys in sorted order.
    pub(crate) fn sorted_entries(&self) -> Vec<(&Vec<S>, &Vec<u32>)> {
        let mut entries: Vec<_> = self.deletions.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Drop everything built so far.
    pub(crate) fn clear(&mut self) {
        self.vocabulary.clear();
        self.prefix_ranges.clear();
        self.deletions = DeletionMap::default();
        self.prefix_lengths.clear();
        self.order = VocabularyOrder::Ascending;
        self.phase = BuildPhase::Idle;
        self.stats = IndexStats::default();
        self.fingerprint = None;
        self.scratch = QueryScratch::default();
    }

    /// Recompute everything derived from the vocabulary and the map.
    pub(crate) fn finish(&mut self) {
        self.order = VocabularyOrder::detect(&self.vocabulary);
        self.prefix_lengths = common_prefix_lengths(&self.vocabulary);
        self.stats = IndexStats {
            words: self.vocabulary.len(),
            prefix_ranges: self.prefix_ranges.len(),
            entries: self.deletions.len(),
            postings: self.deletions.values().map(Vec::len).sum(),
            single_posting_entries: self.deletions.values().filter(|l| l.len() == 1).count(),
            key_symbols: self.deletions.keys().map(Vec::len).sum(),
        };
        self.phase = BuildPhase::Ready;
    }
}

/// Membership test for a vocabulary of known order.
pub(crate) fn in_vocabulary<S: Ord>(words: &[Vec<S>], order: VocabularyOrder, word: &[S]) -> bool {
    match order {
        VocabularyOrder::Ascending => words
            .binary_search_by(|w| w.as_slice().cmp(word))
            .is_ok(),
        VocabularyOrder::Descending => words
            .binary_search_by(|w| word.cmp(w.as_slice()))
            .is_ok(),
        VocabularyOrder::Unsorted => words.iter().any(|w| w.as_slice() == word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(words: &[&str]) -> Vec<Vec<u8>> {
        words.iter().map(|w| w.as_bytes().to_vec()).collect()
    }

    #[test]
    fn membership_in_every_order() {
        let asc = vocab(&["alpha", "beta", "gamma"]);
        let desc = vocab(&["gamma", "beta", "alpha"]);
        let mixed = vocab(&["beta", "gamma", "alpha"]);
        assert!(in_vocabulary(&asc, VocabularyOrder::Ascending, b"beta"));
        assert!(!in_vocabulary(&asc, VocabularyOrder::Ascending, b"bet"));
        assert!(in_vocabulary(&desc, VocabularyOrder::Descending, b"alpha"));
        assert!(!in_vocabulary(&desc, VocabularyOrder::Descending, b"delta"));
        assert!(in_vocabulary(&mixed, VocabularyOrder::Unsorted, b"alpha"));
    }

    #[test]
    fn new_index_is_idle_and_empty() {
        let index = FastSsIndex::<u8>::new(IndexConfig::default()).unwrap();
        assert_eq!(index.phase(), BuildPhase::Idle);
        assert!(index.is_empty());
        assert!(index.fingerprint().is_none());
    }
}
