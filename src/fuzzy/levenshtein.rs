// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded edit distance with early exit.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, and the minimum of
//! a DP row never decreases from one row to the next. Both give cheap ways to
//! stop once the threshold is out of reach.

use crate::symbol::Symbol;

/// Unit-cost Levenshtein distance, capped at `k + 1`.
///
/// Returns the true distance whenever it is at most `k`. Otherwise returns
/// `k + 1`, possibly without finishing the DP.
pub fn bounded_edit_distance<S: Symbol>(a: &[S], b: &[S], k: u32) -> u32 {
    let cap = k + 1;
    if a.len().abs_diff(b.len()) > k as usize {
        return cap;
    }

    let mut dp: Vec<u32> = (0..=b.len() as u32).collect();
    for (i, &ac) in a.iter().enumerate() {
        let mut prev = dp[0];
        dp[0] = i as u32 + 1;
        let mut min_row = dp[0];

        for (j, &bc) in b.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = u32::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > k {
            return cap;
        }
    }

    dp[b.len()].min(cap)
}

/// Are these strings within `max` edits of each other?
#[inline]
pub fn levenshtein_within<S: Symbol>(a: &[S], b: &[S], max: u32) -> bool {
    bounded_edit_distance(a, b, max) <= max
}

/// Unbounded Levenshtein distance. Reference implementation for the
/// linear-scan engine and tests.
pub fn edit_distance<S: Symbol>(a: &[S], b: &[S]) -> u32 {
    let k = a.len().max(b.len()) as u32;
    bounded_edit_distance(a, b, k)
}
