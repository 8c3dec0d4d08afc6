// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A DP matrix that survives between candidates.
//!
//! Candidates come out of the index in vocabulary order often enough that
//! neighbours share long prefixes. Row `i` of the matrix depends only on the
//! query and the first `i` candidate symbols, so when the next candidate shares
//! `p` leading symbols with the previous one, rows `0..=p` are already right.
//!
//! Rows are reused only if they were actually computed: a candidate that was
//! abandoned early leaves fewer valid rows behind.

use super::extension::PrefixMatch;
use crate::symbol::Symbol;

/// Scratch DP state for one query.
#[derive(Debug, Clone)]
pub struct EditMatrix<S> {
    query: Vec<S>,
    k: u32,
    /// Row-major, `query.len() + 1` cells per row.
    cells: Vec<u32>,
    /// Minimum of each row.
    row_mins: Vec<u32>,
    /// Running minimum of the last column through each row, and where it
    /// was first reached.
    best: Vec<u32>,
    best_pos: Vec<usize>,
    /// Rows computed for the most recent candidate, row 0 included.
    valid_rows: usize,
}

impl<S: Symbol> Default for EditMatrix<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> EditMatrix<S> {
    pub fn new() -> Self {
        Self {
            query: Vec::new(),
            k: 0,
            cells: Vec::new(),
            row_mins: Vec::new(),
            best: Vec::new(),
            best_pos: Vec::new(),
            valid_rows: 0,
        }
    }

    /// Start a new query. Invalidates every cached row.
    pub fn reset(&mut self, query: &[S], k: u32) {
        self.query.clear();
        self.query.extend_from_slice(query);
        self.k = k;

        let width = query.len() + 1;
        self.cells.clear();
        self.cells.extend(0..width as u32);
        self.row_mins.clear();
        self.row_mins.push(0);
        self.best.clear();
        self.best.push(query.len() as u32);
        self.best_pos.clear();
        self.best_pos.push(0);
        self.valid_rows = 1;
    }

    /// Rows reusable for a candidate sharing `shared_prefix` symbols with the
    /// previous one.
    #[inline]
    pub fn reusable_rows(&self, shared_prefix: usize) -> usize {
        shared_prefix.min(self.valid_rows.saturating_sub(1))
    }

    /// Fill rows for `candidate`, returning the last row computed.
    fn fill(&mut self, candidate: &[S], shared_prefix: usize) -> usize {
        let width = self.query.len() + 1;
        let m = self.query.len();
        let n = candidate.len();
        let start = self.reusable_rows(shared_prefix.min(n)) + 1;

        let needed = n + 1;
        if self.row_mins.len() < needed {
            self.cells.resize(needed * width, 0);
            self.row_mins.resize(needed, 0);
            self.best.resize(needed, 0);
            self.best_pos.resize(needed, 0);
        }

        let mut last = start - 1;
        if self.row_mins[last] > self.k {
            self.valid_rows = last + 1;
            return last;
        }

        for i in start..=n {
            let (done, rest) = self.cells.split_at_mut(i * width);
            let prev = &done[(i - 1) * width..];
            let cur = &mut rest[..width];
            let wc = candidate[i - 1];

            cur[0] = i as u32;
            let mut row_min = cur[0];
            for j in 1..=m {
                let cost = u32::from(self.query[j - 1] != wc);
                cur[j] = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
                row_min = row_min.min(cur[j]);
            }

            self.row_mins[i] = row_min;
            if cur[m] < self.best[i - 1] {
                self.best[i] = cur[m];
                self.best_pos[i] = i;
            } else {
                self.best[i] = self.best[i - 1];
                self.best_pos[i] = self.best_pos[i - 1];
            }

            last = i;
            if row_min > self.k {
                break;
            }
        }

        self.valid_rows = last + 1;
        last
    }

    /// `ed(query, candidate)`, capped at `k + 1`.
    pub fn edit_distance(&mut self, candidate: &[S], shared_prefix: usize) -> u32 {
        let cap = self.k + 1;
        let last = self.fill(candidate, shared_prefix);
        if last < candidate.len() {
            return cap;
        }
        let width = self.query.len() + 1;
        self.cells[last * width + self.query.len()].min(cap)
    }

    /// `ext(query, candidate)` and its prefix position, capped at `k + 1`.
    pub fn extension(&mut self, candidate: &[S], shared_prefix: usize) -> PrefixMatch {
        let last = self.fill(candidate, shared_prefix);
        let distance = self.best[last];
        PrefixMatch {
            distance: if distance > self.k { self.k + 1 } else { distance },
            position: self.best_pos[last],
        }
    }

    pub fn valid_rows(&self) -> usize {
        self.valid_rows
    }
}
