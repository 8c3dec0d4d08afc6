//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::linear::LinearScan;
use crate::types::{ClosestWords, IndexConfig};

/// Byte words in the given order.
pub fn words(list: &[&str]) -> Vec<Vec<u8>> {
    list.iter().map(|w| w.as_bytes().to_vec()).collect()
}

/// Byte words, sorted and deduplicated.
pub fn sorted_words(list: &[&str]) -> Vec<Vec<u8>> {
    let mut v = words(list);
    v.sort();
    v.dedup();
    v
}

/// Render byte words for assertion messages.
pub fn show(word: &[u8]) -> String {
    String::from_utf8_lossy(word).into_owned()
}

/// `(word id, distance)` pairs sorted by distance, then id.
///
/// Engines agree on the set of matches and on distance order, but ties may
/// come out in different discovery orders.
pub fn canonical(result: &ClosestWords) -> Vec<(u32, u32)> {
    let mut pairs: Vec<(u32, u32)> = result
        .matches
        .iter()
        .map(|m| (m.distance, m.word_id))
        .collect();
    pairs.sort_unstable();
    pairs.into_iter().map(|(d, id)| (id, d)).collect()
}

/// What a linear scan over `vocabulary` returns for `query`.
pub fn brute_force(config: IndexConfig, vocabulary: &[Vec<u8>], query: &[u8]) -> ClosestWords {
    LinearScan::from_vocabulary(config, vocabulary.to_vec())
        .and_then(|scan| scan.search(query))
        .unwrap_or_default()
}

/// Full word matching scenario vocabulary, deliberately unsorted.
pub const ALGORITHM_WORDS: &[&str] = &[
    "algorithm",
    "agorithm",
    "xlgoorithm",
    "algorithmiccomm",
    "algomhtir",
    "someword",
    "algorihm",
];

/// Completion scenario vocabulary around "algorithm": exact prefixes, one
/// edit of each kind, and two words two edits away. Sorted descending.
pub const COMPLETION_WORDS: &[&str] = &[
    "xxalgorithm",
    "axlgorithm",
    "axgorithm",
    "allllgorithm",
    "algorithm",
    "algorith",
    "algorit",
    "agorithm",
];

/// Deterministic pseudo-random lowercase words for benches and soak tests.
pub fn generated_words(count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut state = seed | 1;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let mut out: Vec<Vec<u8>> = (0..count)
        .map(|_| {
            let len = 3 + (next() % 10) as usize;
            (0..len).map(|_| b'a' + (next() % 26) as u8).collect()
        })
        .collect();
    out.sort();
    out.dedup();
    out
}
