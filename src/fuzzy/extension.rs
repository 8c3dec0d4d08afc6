// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Extension ("completion") distance.
//!
//! `ext(q, w) = min over prefixes p of w of ed(q, p)`, the empty prefix
//! included. One DP matrix gives every prefix at once: row `i` is the prefix of
//! length `i`, and its last cell is `ed(q, w[..i])`.

use crate::symbol::Symbol;

/// Best prefix of a candidate for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    /// `ext(q, w)`, or `k + 1` when it exceeds the bound.
    pub distance: u32,
    /// Length of the shortest candidate prefix reaching `distance`.
    pub position: usize,
}

/// Extension distance, capped at `k + 1`.
#[inline]
pub fn extension_distance<S: Symbol>(query: &[S], candidate: &[S], k: u32) -> u32 {
    extension_distance_with_position(query, candidate, k).distance
}

/// Extension distance together with the prefix length that achieves it.
pub fn extension_distance_with_position<S: Symbol>(
    query: &[S],
    candidate: &[S],
    k: u32,
) -> PrefixMatch {
    let m = query.len();
    let mut row: Vec<u32> = (0..=m as u32).collect();
    let mut best = PrefixMatch {
        distance: row[m],
        position: 0,
    };

    for (i, &wc) in candidate.iter().enumerate() {
        if best.distance == 0 {
            break;
        }
        let mut diag = row[0];
        row[0] = i as u32 + 1;
        let mut row_min = row[0];

        for (j, &qc) in query.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = (up + 1).min(row[j] + 1).min(diag + u32::from(qc != wc));
            diag = up;
            row_min = row_min.min(row[j + 1]);
        }

        if row[m] < best.distance {
            best = PrefixMatch {
                distance: row[m],
                position: i + 1,
            };
        }
        // Later rows can only be worse than this row's minimum.
        if row_min > k {
            break;
        }
    }

    if best.distance > k {
        best.distance = k + 1;
    }
    best
}

/// Extension distance of a growing query against one fixed candidate.
///
/// Holds one DP column over the candidate's prefixes. Each pushed query
/// symbol advances the column. Only the `2k + 1` rows around the diagonal can
/// still be within `k`; the rest are pinned to `k + 1`.
///
/// Index retrieval verifies whole queries with [`EditMatrix`]; this is for
/// type-ahead callers that re-check a shortlist after every keystroke.
///
/// [`EditMatrix`]: crate::fuzzy::EditMatrix
#[derive(Debug, Clone)]
pub struct IncrementalExtension<'a, S> {
    candidate: &'a [S],
    k: u32,
    query_len: usize,
    column: Vec<u32>,
    next: Vec<u32>,
}

impl<'a, S: Symbol> IncrementalExtension<'a, S> {
    pub fn new(candidate: &'a [S], k: u32) -> Self {
        let cap = k + 1;
        let column: Vec<u32> = (0..=candidate.len() as u32).map(|i| i.min(cap)).collect();
        let next = vec![cap; column.len()];
        Self {
            candidate,
            k,
            query_len: 0,
            column,
            next,
        }
    }

    /// Append one query symbol and return the updated distance.
    pub fn push(&mut self, symbol: S) -> u32 {
        let cap = self.k + 1;
        let j = self.query_len + 1;
        let n = self.candidate.len();
        let lo = j.saturating_sub(self.k as usize).max(1);
        let hi = (j + self.k as usize).min(n);

        self.next[0] = (j as u32).min(cap);
        for i in 1..=n {
            self.next[i] = if i < lo || i > hi {
                cap
            } else {
                let left = self.column[i];
                let up = self.next[i - 1];
                let diag = self.column[i - 1] + u32::from(self.candidate[i - 1] != symbol);
                (left + 1).min(up + 1).min(diag).min(cap)
            };
        }

        std::mem::swap(&mut self.column, &mut self.next);
        self.query_len = j;
        self.distance()
    }

    /// Current `ext(query, candidate)`, capped at `k + 1`.
    pub fn distance(&self) -> u32 {
        self.column.iter().copied().min().unwrap_or(self.k + 1)
    }

    pub fn query_len(&self) -> usize {
        self.query_len
    }

    /// Forget the query and start over.
    pub fn reset(&mut self) {
        let cap = self.k + 1;
        for (i, cell) in self.column.iter_mut().enumerate() {
            *cell = (i as u32).min(cap);
        }
        self.query_len = 0;
    }
}
