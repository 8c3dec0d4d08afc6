// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Distances for very short queries.
//!
//! A query of at most three symbols fits in a four-cell column on the stack,
//! so checking a candidate needs neither the scratch matrix nor the compiled
//! bit-parallel pattern. Results are the exact capped distances.

use crate::symbol::Symbol;

/// Longest query the stack path handles.
pub const SHORT_QUERY_MAX: usize = 3;

/// Largest threshold the stack path is used with.
pub const SHORT_QUERY_MAX_THRESHOLD: u32 = 2;

/// Whether the stack path applies.
#[inline]
pub fn is_short_query(query_len: usize, k: u32) -> bool {
    query_len <= SHORT_QUERY_MAX && k <= SHORT_QUERY_MAX_THRESHOLD
}

/// `ed(query, candidate)` or, with `extension`, `ext(query, candidate)`,
/// capped at `k + 1`. `query` must be at most [`SHORT_QUERY_MAX`] symbols.
pub fn short_query_distance<S: Symbol>(query: &[S], candidate: &[S], k: u32, extension: bool) -> u32 {
    let m = query.len().min(SHORT_QUERY_MAX);
    let query = &query[..m];
    let cap = k + 1;

    if !extension && query.len().abs_diff(candidate.len()) > k as usize {
        return cap;
    }

    let mut row = [0u32; SHORT_QUERY_MAX + 1];
    for (j, cell) in row.iter_mut().enumerate().take(m + 1) {
        *cell = j as u32;
    }
    let mut best = row[m];
    let mut finished = true;

    for (i, &wc) in candidate.iter().enumerate() {
        if extension && best == 0 {
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
        best = best.min(row[m]);
        if row_min > k {
            finished = i + 1 == candidate.len();
            break;
        }
    }

    let distance = if extension {
        best
    } else if finished {
        row[m]
    } else {
        cap
    };
    distance.min(cap)
}
