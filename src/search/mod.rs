// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Retrieval: probe, expand, filter, verify.
//!
//! ```text
//! query ──▶ probe string ──▶ deletions ──▶ postings ──▶ prefix ranges ──▶ word ids
//!                                                                          │
//!            matches ◀── stable sort ◀── verify ◀── filters ◀── dedup ◀────┘
//! ```
//!
//! The probe is the query itself in full word matching and its first
//! `truncate_length` symbols otherwise. Candidates are verified against the
//! whole query, so truncation only widens the candidate set.

mod filters;
mod scratch;
#[cfg(feature = "parallel")]
mod shared;

use log::{debug, warn};

use crate::error::{FuzzyError, Result};
use crate::fuzzy::{is_short_query, short_query_distance};
use crate::index::{for_each_deletion, FastSsIndex};
use crate::symbol::Symbol;
use crate::types::{ClosestWords, DistanceEngine, Match, Mode, MAX_WORD_LEN};

pub use scratch::QueryScratch;
#[cfg(feature = "parallel")]
pub use shared::SharedSearcher;

use filters::{length_rejects, letter_window, letters_reject};

/// Apply the query length policy of `mode`.
///
/// Full word matching rejects queries longer than [`MAX_WORD_LEN`]; the
/// truncated modes clamp them.
pub(crate) fn prepare_query<S: Symbol>(mode: Mode, query: &[S]) -> Result<&[S]> {
    if query.len() <= MAX_WORD_LEN {
        return Ok(query);
    }
    match mode {
        Mode::WordMatchingFull => Err(FuzzyError::QueryTooLong {
            len: query.len(),
            max: MAX_WORD_LEN,
        }),
        Mode::WordMatchingTruncated | Mode::CompletionMatching => {
            warn!(
                "query of {} symbols clamped to {}",
                query.len(),
                MAX_WORD_LEN
            );
            Ok(&query[..MAX_WORD_LEN])
        }
    }
}

/// Stable sort by distance only, so equal distances keep discovery order.
pub(crate) fn sort_matches(matches: &mut [Match]) {
    matches.sort_by_key(|m| m.distance);
}

impl<S: Symbol> FastSsIndex<S> {
    /// Every vocabulary word within threshold of `query`.
    ///
    /// Uses the scratch state owned by the index. For concurrent lookups on a
    /// shared index use [`FastSsIndex::find_closest_words_with`].
    pub fn find_closest_words(&mut self, query: &[S]) -> Result<ClosestWords> {
        let mut scratch = std::mem::take(&mut self.scratch);
        let result = self.find_closest_words_with(query, &mut scratch);
        self.scratch = scratch;
        result
    }

    /// [`FastSsIndex::find_closest_words`] with caller-provided scratch state.
    pub fn find_closest_words_with(
        &self,
        query: &[S],
        scratch: &mut QueryScratch<S>,
    ) -> Result<ClosestWords> {
        let query = prepare_query(self.config.mode, query)?;
        scratch.begin(self.vocabulary.len());

        let in_vocabulary = self.in_vocabulary(query);
        if query.is_empty() || self.vocabulary.is_empty() {
            return Ok(ClosestWords {
                in_vocabulary,
                matches: Vec::new(),
            });
        }

        let mode = self.config.mode;
        let k = self.config.threshold.for_query(query.len());
        let probe = if mode.is_truncated() {
            &query[..query.len().min(self.config.truncate_length)]
        } else {
            query
        };

        let plan = Verifier::new(self, query, k, scratch)?;
        for_each_deletion(probe, 0, 0, k, &mut |key: &[S], _| {
            scratch.stats.probes += 1;
            let Some(groups) = self.deletions.get(key) else {
                return;
            };
            for &gid in groups {
                for id in self.prefix_ranges[gid as usize].ids() {
                    if scratch.mark(id) {
                        plan.verify(self, id, scratch);
                    }
                }
            }
        });

        let mut matches = std::mem::take(&mut scratch.matches);
        sort_matches(&mut matches);
        debug!("query of {} symbols, k={}: {:?}", query.len(), k, scratch.stats);

        Ok(ClosestWords {
            in_vocabulary,
            matches,
        })
    }
}

/// Per-query decisions, fixed before the first candidate.
struct Verifier<'q, S> {
    query: &'q [S],
    k: u32,
    extension: bool,
    short: bool,
    letters: bool,
    bit_parallel: bool,
}

impl<'q, S: Symbol> Verifier<'q, S> {
    fn new(
        index: &FastSsIndex<S>,
        query: &'q [S],
        k: u32,
        scratch: &mut QueryScratch<S>,
    ) -> Result<Self> {
        let config = &index.config;
        let extension = config.mode.is_completion();
        let short = is_short_query(query.len(), k);
        let letters = config.mode.is_truncated() && query.len() > config.truncate_length;
        let bit_parallel = !extension
            && !short
            && matches!(
                config.distance_engine,
                DistanceEngine::Auto | DistanceEngine::BitParallel
            );

        if letters {
            scratch.load_letters(query);
        }
        if bit_parallel {
            scratch.pattern.reset(query)?;
        } else if !short {
            scratch.matrix.reset(query, k);
        }

        Ok(Self {
            query,
            k,
            extension,
            short,
            letters,
            bit_parallel,
        })
    }

    fn verify(&self, index: &FastSsIndex<S>, id: u32, scratch: &mut QueryScratch<S>) {
        scratch.stats.candidates += 1;
        let word = index.vocabulary[id as usize].as_slice();
        let (query, k) = (self.query, self.k);

        if length_rejects(query.len(), word.len(), k, self.extension) {
            scratch.stats.length_filtered += 1;
            return;
        }

        if let Some(distance) = self.shortcut(index, id, word, scratch) {
            scratch.stats.shortcut_hits += 1;
            scratch.matches.push(Match {
                word_id: id,
                distance,
            });
            return;
        }

        if self.letters {
            let window = letter_window(word, query.len(), k, self.extension);
            let common = scratch.common_letters(window);
            if letters_reject(common, query.len(), word.len(), k, self.extension) {
                scratch.stats.letter_filtered += 1;
                return;
            }
        }

        let distance = if self.short {
            scratch.stats.short_query_checks += 1;
            short_query_distance(query, word, k, self.extension)
        } else {
            scratch.stats.distance_computations += 1;
            self.distance(index, id, word, scratch)
        };

        if distance <= k {
            scratch.matches.push(Match {
                word_id: id,
                distance,
            });
        }
    }

    /// Distance-zero answers that need no DP.
    fn shortcut(
        &self,
        index: &FastSsIndex<S>,
        id: u32,
        word: &[S],
        scratch: &mut QueryScratch<S>,
    ) -> Option<u32> {
        if !self.extension {
            return (word == self.query).then_some(0);
        }

        // The previous word starts with the query and shares at least that
        // much with this one.
        if let Some((prev, position)) = scratch.last_exact {
            if id > 0 && prev == id - 1 && index.prefix_lengths[id as usize] >= position {
                scratch.last_exact = Some((id, position));
                return Some(0);
            }
        }
        if word.starts_with(self.query) {
            scratch.last_exact = Some((id, self.query.len()));
            return Some(0);
        }
        None
    }

    fn distance(
        &self,
        index: &FastSsIndex<S>,
        id: u32,
        word: &[S],
        scratch: &mut QueryScratch<S>,
    ) -> u32 {
        if self.bit_parallel {
            return scratch.pattern.distance(word, false);
        }

        let shared = match scratch.matrix_candidate {
            Some(prev) if id > 0 && prev == id - 1 => index.prefix_lengths[id as usize],
            _ => 0,
        };
        scratch.matrix_candidate = Some(id);

        if self.extension {
            let hit = scratch.matrix.extension(word, shared);
            if hit.distance == 0 {
                scratch.last_exact = Some((id, hit.position));
            }
            hit.distance
        } else {
            scratch.matrix.edit_distance(word, shared)
        }
    }
}
