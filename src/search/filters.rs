// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cheap lower bounds that reject candidates before any DP.
//!
//! Every filter here rejects only candidates whose distance is provably above
//! the threshold, so the result set is the same with or without them.

/// Length bound. `ed(q, w) >= ||q| - |w||` and `ext(q, w) >= |q| - |w|`.
#[inline]
pub(crate) fn length_rejects(query_len: usize, word_len: usize, k: u32, extension: bool) -> bool {
    if extension {
        word_len + (k as usize) < query_len
    } else {
        query_len.abs_diff(word_len) > k as usize
    }
}

/// Symbols of `word` the letter filter compares against the query.
///
/// A prefix within extension distance `k` of the query has at most
/// `|q| + k` symbols, so nothing after that can help.
#[inline]
pub(crate) fn letter_window<S>(word: &[S], query_len: usize, k: u32, extension: bool) -> &[S] {
    if extension {
        &word[..word.len().min(query_len + k as usize)]
    } else {
        word
    }
}

/// Bag bound from the number of letters the query and the window share.
///
/// Each edit fixes at most one unmatched letter on each side, so
/// `ed(q, w) >= max(|q|, |w|) - common`. For the extension distance only the
/// query side counts.
#[inline]
pub(crate) fn letters_reject(
    common: usize,
    query_len: usize,
    word_len: usize,
    k: u32,
    extension: bool,
) -> bool {
    let need = if extension {
        query_len
    } else {
        query_len.max(word_len)
    };
    common + (k as usize) < need
}
