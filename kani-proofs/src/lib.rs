// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for fastss prefix ranges.
//!
//! This standalone crate extracts the 23/9-bit prefix range packing and the
//! run splitting used when grouping the vocabulary, and proves them with Kani.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Packing**: `new` accepts exactly the representable pairs and unpacks to them
//! 2. **No overflow**: `last()` of any 32-bit pattern fits in a u32
//! 3. **Splitting**: split runs tile `[start, end)` with no gaps or overlap
//! 4. **Load check**: a range that passes the loader's bound only names valid ids

/// Bits holding the first word id.
pub const WORD_ID_BITS: u32 = 23;

/// Bits holding the count of additional words.
pub const RUN_BITS: u32 = 9;

pub const MAX_RUN: u32 = (1 << RUN_BITS) - 1;

pub const MAX_VOCABULARY: usize = 1 << WORD_ID_BITS;

// ============================================================================
// PREFIX RANGE PACKING (copied from src/index/prefix_range.rs)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange(u32);

impl PrefixRange {
    pub fn new(first: u32, run: u32) -> Option<Self> {
        if (first as usize) >= MAX_VOCABULARY || run > MAX_RUN {
            return None;
        }
        Some(PrefixRange((first << RUN_BITS) | run))
    }

    pub fn from_bits(bits: u32) -> Self {
        PrefixRange(bits)
    }

    pub fn first(self) -> u32 {
        self.0 >> RUN_BITS
    }

    pub fn run(self) -> u32 {
        self.0 & MAX_RUN
    }

    pub fn last(self) -> u32 {
        self.first() + self.run()
    }
}

/// Split `[start, end)` into ranges of at most `MAX_RUN + 1` ids.
pub fn split_run(start: usize, end: usize, out: &mut Vec<PrefixRange>) {
    let mut first = start;
    while first < end {
        let run = (end - first - 1).min(MAX_RUN as usize);
        if let Some(range) = PrefixRange::new(first as u32, run as u32) {
            out.push(range);
        }
        first += run + 1;
    }
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Representable pairs pack, unpack and report their last id.
    #[kani::proof]
    fn verify_pack_unpack() {
        let first: u32 = kani::any();
        let run: u32 = kani::any();

        match PrefixRange::new(first, run) {
            Some(range) => {
                kani::assert((first as usize) < MAX_VOCABULARY, "first id must fit 23 bits");
                kani::assert(run <= MAX_RUN, "run must fit 9 bits");
                kani::assert(range.first() == first, "first id must round-trip");
                kani::assert(range.run() == run, "run must round-trip");
                kani::assert(range.last() == first + run, "last id is first + run");
            }
            None => {
                kani::assert(
                    (first as usize) >= MAX_VOCABULARY || run > MAX_RUN,
                    "only unrepresentable pairs are rejected",
                );
            }
        }
    }

    /// Any bit pattern read from a file unpacks without overflow.
    #[kani::proof]
    fn verify_last_never_overflows() {
        let range = PrefixRange::from_bits(kani::any());
        let last = range.first() as u64 + range.run() as u64;
        kani::assert(last <= u32::MAX as u64, "last id fits in u32");
        kani::assert(range.last() as u64 == last, "last matches wide sum");
    }

    /// The loader accepts a range iff its last id is inside the vocabulary;
    /// then every id it names is.
    #[kani::proof]
    fn verify_loader_bound() {
        let range = PrefixRange::from_bits(kani::any());
        let vocabulary: usize = kani::any_where(|&n| n <= MAX_VOCABULARY);
        if (range.last() as usize) < vocabulary {
            let offset: u32 = kani::any_where(|&o| o <= range.run());
            kani::assert(
                ((range.first() + offset) as usize) < vocabulary,
                "every id of an accepted range is valid",
            );
        }
    }

    /// Split runs tile the input exactly.
    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_split_tiles_the_run() {
        let start: usize = kani::any_where(|&s| s < MAX_VOCABULARY - 2048);
        let len: usize = kani::any_where(|&l| l <= 2048);
        let end = start + len;

        let mut out = Vec::new();
        split_run(start, end, &mut out);

        let mut next = start;
        for range in &out {
            kani::assert(range.first() as usize == next, "ranges are contiguous");
            next = range.last() as usize + 1;
        }
        kani::assert(next == end, "ranges cover the whole run");
        kani::assert(out.len() == len.div_ceil(MAX_RUN as usize + 1), "minimal number of ranges");
    }
}
