// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Deletion neighborhoods.
//!
//! The `k`-deletion neighborhood of a word is the word itself plus every string
//! reachable by deleting at most `k` symbols. Two words within edit distance
//! `k` always share a member of their neighborhoods, which is what lets a hash
//! lookup stand in for a scan.
//!
//! Deletions are generated in canonical left-to-right order: after deleting
//! position `i`, the next deletion starts at `i`, so the same set of deleted
//! positions is never produced twice. Equal strings from different position
//! sets (deleting either `a` of `aab`) can still repeat.

use crate::symbol::Symbol;

/// Visit `word` and every string obtained from it by deleting up to
/// `max_depth - depth` more symbols at positions `>= beg`.
///
/// `visit` receives each string together with the number of deletions that
/// produced it. Callers start with `beg = 0, depth = 0`.
pub fn for_each_deletion<S, F>(word: &[S], beg: usize, depth: u32, max_depth: u32, visit: &mut F)
where
    S: Symbol,
    F: FnMut(&[S], u32),
{
    visit(word, depth);
    if depth >= max_depth || word.is_empty() {
        return;
    }

    let mut shorter: Vec<S> = Vec::with_capacity(word.len() - 1);
    for i in beg..word.len() {
        shorter.clear();
        shorter.extend_from_slice(&word[..i]);
        shorter.extend_from_slice(&word[i + 1..]);
        for_each_deletion(&shorter, i, depth + 1, max_depth, visit);
    }
}

/// Number of strings [`for_each_deletion`] visits for a word of `len` symbols:
/// `sum over d in 0..=k of C(len, d)`.
pub fn neighborhood_size(len: usize, max_depth: u32) -> usize {
    let mut total = 0usize;
    let mut binomial = 1usize;
    for d in 0..=(max_depth as usize).min(len) {
        total += binomial;
        binomial = binomial * (len - d) / (d + 1);
    }
    total
}
