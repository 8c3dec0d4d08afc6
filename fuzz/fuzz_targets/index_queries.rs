// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index queries must equal a linear scan.
//!
//! The deletion map, prefix ranges and filters are all shortcuts. Whatever
//! vocabulary and query the fuzzer picks, the answer set must be exactly the
//! words a brute-force scan accepts, with the same distances.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use fastss::testing::{brute_force, canonical};
use fastss::{FastSsIndex, IndexConfig, Mode, Threshold};

#[derive(Debug, Arbitrary)]
struct QueryInput {
    words: Vec<Vec<u8>>,
    queries: Vec<Vec<u8>>,
    mode: u8,
    threshold: u8,
    truncate: u8,
    sort: bool,
}

fuzz_target!(|input: QueryInput| {
    let squash = |w: &[u8]| -> Vec<u8> { w.iter().take(14).map(|b| b'a' + b % 5).collect() };
    let mut vocabulary: Vec<Vec<u8>> = input.words.iter().take(200).map(|w| squash(w)).collect();
    if input.sort {
        vocabulary.sort();
    }

    let mode = match input.mode % 3 {
        0 => Mode::WordMatchingFull,
        1 => Mode::WordMatchingTruncated,
        _ => Mode::CompletionMatching,
    };
    let threshold = match input.threshold % 5 {
        4 => Threshold::Dynamic,
        k => Threshold::Fixed(u32::from(k)),
    };
    let config = IndexConfig::new(mode, threshold).with_truncate_length(1 + usize::from(input.truncate % 8));

    let mut index = FastSsIndex::from_vocabulary(config, vocabulary.clone()).expect("index builds");
    for query in input.queries.iter().take(8) {
        let query = squash(query);
        let got = index.find_closest_words(&query).expect("query runs");
        let want = brute_force(config, &vocabulary, &query);
        assert_eq!(canonical(&got), canonical(&want), "{mode:?} {threshold} {query:?}");
        assert_eq!(got.in_vocabulary, want.in_vocabulary);
    }
});
