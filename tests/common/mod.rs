//! Shared test utilities and fixtures.

#![allow(dead_code)]

use fastss::{FastSsIndex, IndexConfig, Mode, Threshold};

// Re-export canonical helpers from fastss::testing
pub use fastss::testing::{
    brute_force, canonical, generated_words, show, sorted_words, words, ALGORITHM_WORDS,
    COMPLETION_WORDS,
};

pub const ALL_MODES: [Mode; 3] = [
    Mode::WordMatchingFull,
    Mode::WordMatchingTruncated,
    Mode::CompletionMatching,
];

/// Build a byte index with a fixed threshold.
pub fn build(mode: Mode, k: u32, vocabulary: Vec<Vec<u8>>) -> FastSsIndex<u8> {
    FastSsIndex::from_vocabulary(IndexConfig::new(mode, Threshold::Fixed(k)), vocabulary)
        .expect("index builds")
}

/// `(word, distance)` for every match, in result order.
pub fn named(index: &mut FastSsIndex<u8>, query: &str) -> Vec<(String, u32)> {
    let found = index.find_closest_words(query.as_bytes()).expect("query runs");
    found
        .matches
        .iter()
        .map(|m| (show(index.word(m.word_id).unwrap()), m.distance))
        .collect()
}

/// Assert the index answers `query` exactly like a linear scan.
pub fn assert_matches_brute_force(index: &mut FastSsIndex<u8>, query: &[u8]) {
    let config = *index.config();
    let vocabulary = index.vocabulary().to_vec();
    let got = index.find_closest_words(query).expect("query runs");
    let want = brute_force(config, &vocabulary, query);
    assert_eq!(
        canonical(&got),
        canonical(&want),
        "mode {:?}, threshold {}, query {:?}",
        config.mode,
        config.threshold,
        show(query)
    );
    assert_eq!(got.in_vocabulary, want.in_vocabulary);
}
