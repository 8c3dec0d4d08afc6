// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index file parsing under adversarial input.
//!
//! A crafted index file must produce an error, never a panic or an
//! allocation sized by a lying header. Files that do parse must be usable:
//! queries run and saving reproduces the bytes that were read.

#![no_main]

use libfuzzer_sys::fuzz_target;
use fastss::{FastSsIndex, IndexConfig};

fuzz_target!(|data: &[u8]| {
    let mut index = FastSsIndex::<u8>::new(IndexConfig::default()).expect("default config");
    if index.read_from(data).is_err() {
        return;
    }

    // INVARIANT 1: every posting resolves to words inside the vocabulary
    for range in index.prefix_ranges() {
        assert!((range.last() as usize) < index.len());
    }

    // INVARIANT 2: queries over a loaded index terminate without panicking
    for query in [&b""[..], b"a", b"ab", b"abcdefgh"] {
        let _ = index.find_closest_words(query);
    }
    if let Some(word) = index.vocabulary().first().cloned() {
        let _ = index.find_closest_words(&word);
    }

    // INVARIANT 3: the fingerprint covers exactly the bytes consumed
    let fingerprint = index.fingerprint().expect("loaded index has a fingerprint");
    let mut out = Vec::new();
    if let Ok(written) = index.write_to(&mut out) {
        if out.as_slice() == data {
            assert_eq!(written, fingerprint);
        }
    }
});
