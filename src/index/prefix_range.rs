// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Packed runs of consecutive vocabulary words.
//!
//! A sorted vocabulary puts words with a common prefix next to each other. All
//! of them produce the same deletion keys, so instead of posting each word the
//! index posts one `PrefixRange`: the first word id and how many more follow.
//!
//! ```text
//!  31                     9 8        0
//! ┌────────────────────────┬──────────┐
//! │   first word id (23)   │ run (9)  │
//! └────────────────────────┴──────────┘
//! ```
//!
//! Runs longer than `MAX_RUN + 1` words are split into several ranges.

use std::ops::RangeInclusive;

use crate::fuzzy::common_prefix_len;
use crate::types::{Mode, Threshold};

/// Bits holding the first word id.
pub const WORD_ID_BITS: u32 = 23;

/// Bits holding the count of additional words.
pub const RUN_BITS: u32 = 9;

const _: () = assert!(WORD_ID_BITS + RUN_BITS == u32::BITS);

/// Largest run a single range can express.
pub const MAX_RUN: u32 = (1 << RUN_BITS) - 1;

/// Largest vocabulary the packed id can address.
pub const MAX_VOCABULARY: usize = 1 << WORD_ID_BITS;

/// `(first word id, additional words)` packed into 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PrefixRange(u32);

impl PrefixRange {
    /// Pack a range. `None` if either field overflows its bits.
    #[inline]
    pub fn new(first: u32, run: u32) -> Option<Self> {
        if (first as usize) >= MAX_VOCABULARY || run > MAX_RUN {
            return None;
        }
        Some(PrefixRange((first << RUN_BITS) | run))
    }

    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        PrefixRange(bits)
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn first(self) -> u32 {
        self.0 >> RUN_BITS
    }

    #[inline]
    pub fn run(self) -> u32 {
        self.0 & MAX_RUN
    }

    #[inline]
    pub fn last(self) -> u32 {
        self.first() + self.run()
    }

    /// Word ids covered by this range.
    #[inline]
    pub fn ids(self) -> RangeInclusive<u32> {
        self.first()..=self.last()
    }

    /// Words covered, always at least one.
    #[inline]
    pub fn word_count(self) -> usize {
        self.run() as usize + 1
    }
}

/// One indexable group: a range of words and the key they share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PrefixGroup {
    pub range: PrefixRange,
    /// Symbols of the first word that form the key.
    pub key_len: usize,
    /// Deletion depth the key is expanded to.
    pub depth: u32,
}

/// Lengths of the keys a mode indexes, one pass over the vocabulary each.
fn key_lengths(mode: Mode, truncate_length: usize) -> Vec<usize> {
    match mode {
        Mode::WordMatchingFull => vec![usize::MAX],
        Mode::WordMatchingTruncated => vec![truncate_length],
        Mode::CompletionMatching => (1..=truncate_length).collect(),
    }
}

/// Group the vocabulary into prefix ranges.
///
/// For every key length the mode uses, maximal runs of consecutive words with
/// an equal key become groups. In completion mode a run whose key is shorter
/// than the current length was already produced at that shorter length, with
/// the same members or more, and is skipped.
///
/// Callers guarantee `words.len() <= MAX_VOCABULARY`.
pub(crate) fn compute_prefix_groups<S: Ord>(
    words: &[Vec<S>],
    mode: Mode,
    truncate_length: usize,
    threshold: Threshold,
) -> Vec<PrefixGroup> {
    let mut groups = Vec::new();

    for (pass, len) in key_lengths(mode, truncate_length).into_iter().enumerate() {
        let key = |w: &[S]| len.min(w.len());
        let mut i = 0;
        while i < words.len() {
            let key_len = key(&words[i]);
            let prefix = &words[i][..key_len];
            let mut end = i + 1;
            let mut depth = threshold.index_depth(words[i].len());
            while end < words.len()
                && key(&words[end]) == key_len
                && words[end][..key_len] == *prefix
            {
                depth = depth.max(threshold.index_depth(words[end].len()));
                end += 1;
            }

            let already_indexed = mode.is_completion() && pass > 0 && key_len < len;
            if !already_indexed {
                push_split(&mut groups, i, end, key_len, depth);
            }
            i = end;
        }
    }

    groups
}

/// Append `[start, end)` as one or more ranges of at most `MAX_RUN + 1` words.
fn push_split(groups: &mut Vec<PrefixGroup>, start: usize, end: usize, key_len: usize, depth: u32) {
    let mut first = start;
    while first < end {
        let run = (end - first - 1).min(MAX_RUN as usize);
        if let Some(range) = PrefixRange::new(first as u32, run as u32) {
            groups.push(PrefixGroup {
                range,
                key_len,
                depth,
            });
        }
        first += run + 1;
    }
}

/// `lengths[i]` = common prefix length of word `i` and word `i - 1`.
/// `lengths[0] = 0`.
pub fn common_prefix_lengths<S: PartialEq>(words: &[Vec<S>]) -> Vec<usize> {
    let mut lengths = Vec::with_capacity(words.len());
    if !words.is_empty() {
        lengths.push(0);
    }
    lengths.extend(words.windows(2).map(|w| common_prefix_len(&w[0], &w[1])));
    lengths
}
