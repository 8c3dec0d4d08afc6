// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Distance kernels must agree with each other.
//!
//! Every kernel caps at `k + 1` and is exact below it, so for any pair of
//! words the bounded DP, the reusable matrix, the bit-parallel pattern and
//! the short-query path all report the same capped value.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use fastss::fuzzy::{
    bounded_edit_distance, edit_distance, extension_distance, is_short_query,
    short_query_distance, EditMatrix, IncrementalExtension, MyersPattern,
};

#[derive(Debug, Arbitrary)]
struct DistanceInput {
    query: Vec<u8>,
    candidate: Vec<u8>,
    previous: Vec<u8>,
    k: u8,
}

fuzz_target!(|input: DistanceInput| {
    // Small alphabet so matches actually happen
    let squash = |w: &[u8]| -> Vec<u8> { w.iter().take(40).map(|b| b'a' + b % 4).collect() };
    let query = squash(&input.query);
    let candidate = squash(&input.candidate);
    let previous = squash(&input.previous);
    let k = u32::from(input.k % 4);
    let cap = k + 1;

    let exact = edit_distance(&query, &candidate).min(cap);
    assert_eq!(bounded_edit_distance(&query, &candidate, k), exact);

    let pattern = MyersPattern::new(&query).expect("pattern fits in a word");
    assert_eq!(pattern.distance(&candidate, false).min(cap), exact);

    // Matrix reuse after an unrelated candidate
    let mut matrix = EditMatrix::new();
    matrix.reset(&query, k);
    let _ = matrix.edit_distance(&previous, 0);
    let shared = fastss::fuzzy::common_prefix_len(&previous, &candidate);
    assert_eq!(matrix.edit_distance(&candidate, shared), exact);

    let ext = extension_distance(&query, &candidate, k);
    assert!(ext <= exact);
    let mut incremental = IncrementalExtension::new(&candidate, k);
    for &symbol in &query {
        incremental.push(symbol);
    }
    assert_eq!(incremental.distance(), ext);

    if is_short_query(query.len(), k) {
        assert_eq!(short_query_distance(&query, &candidate, k, false), exact);
        assert_eq!(short_query_distance(&query, &candidate, k, true), ext);
    }
});
