// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-query mutable state.
//!
//! Everything a lookup writes lives here so the index itself can stay behind a
//! shared reference. One scratch serves one query at a time; concurrent
//! readers each bring their own.

use crate::fuzzy::{EditMatrix, MyersPattern};
use crate::symbol::Symbol;
use crate::types::{Match, QueryStats};

/// Reusable buffers for [`crate::FastSsIndex::find_closest_words_with`].
#[derive(Debug, Clone)]
pub struct QueryScratch<S> {
    /// `seen[id]` is set once word `id` has been considered this query.
    seen: Vec<bool>,
    /// Ids set in `seen`, so clearing costs only what was touched.
    touched: Vec<u32>,
    /// Query letter histogram, restored after every candidate.
    letters: Box<[u32; 256]>,
    taken: Vec<u8>,
    pub(crate) matrix: EditMatrix<S>,
    pub(crate) pattern: MyersPattern<S>,
    /// Candidate whose rows are currently in `matrix`.
    pub(crate) matrix_candidate: Option<u32>,
    /// Most recent candidate with an exact prefix hit, and the hit length.
    pub(crate) last_exact: Option<(u32, usize)>,
    pub(crate) matches: Vec<Match>,
    pub(crate) stats: QueryStats,
}

impl<S: Symbol> Default for QueryScratch<S> {
    fn default() -> Self {
        Self {
            seen: Vec::new(),
            touched: Vec::new(),
            letters: Box::new([0; 256]),
            taken: Vec::new(),
            matrix: EditMatrix::new(),
            pattern: MyersPattern::default(),
            matrix_candidate: None,
            last_exact: None,
            matches: Vec::new(),
            stats: QueryStats::default(),
        }
    }
}

impl<S: Symbol> QueryScratch<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a query against a vocabulary of `vocabulary_len` words.
    pub(crate) fn begin(&mut self, vocabulary_len: usize) {
        for &id in &self.touched {
            if let Some(flag) = self.seen.get_mut(id as usize) {
                *flag = false;
            }
        }
        self.touched.clear();
        if self.seen.len() != vocabulary_len {
            self.seen.clear();
            self.seen.resize(vocabulary_len, false);
        }
        self.matrix_candidate = None;
        self.last_exact = None;
        self.matches.clear();
        self.stats = QueryStats::default();
    }

    /// Mark `id` as seen. `false` if it already was.
    #[inline]
    pub(crate) fn mark(&mut self, id: u32) -> bool {
        let flag = &mut self.seen[id as usize];
        if *flag {
            return false;
        }
        *flag = true;
        self.touched.push(id);
        true
    }

    /// Load the query's letter histogram.
    pub(crate) fn load_letters(&mut self, query: &[S]) {
        self.letters.fill(0);
        for &s in query {
            self.letters[s.bucket() as usize] += 1;
        }
    }

    /// Bucketed multiset intersection of the query with `window`.
    pub(crate) fn common_letters(&mut self, window: &[S]) -> usize {
        let mut common = 0;
        for &s in window {
            let b = s.bucket();
            let slot = &mut self.letters[b as usize];
            if *slot > 0 {
                *slot -= 1;
                common += 1;
                self.taken.push(b);
            }
        }
        for b in self.taken.drain(..) {
            self.letters[b as usize] += 1;
        }
        common
    }

    pub fn stats(&self) -> QueryStats {
        self.stats
    }
}
