// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bit-parallel edit distance (Myers 1999, Hyyrö 2001/2003).
//!
//! The DP column for a pattern of up to 64 symbols fits in one machine word,
//! encoded as vertical deltas (`VP`/`VN` bit vectors). Each text symbol updates
//! the whole column with a handful of word operations, and the score is tracked
//! at the last pattern row.
//!
//! With `allow_transposition` the recurrence gains Hyyrö's `TR` term and
//! computes the optimal string alignment distance, where swapping two adjacent
//! symbols costs one edit.

use ahash::AHashMap;

use crate::error::{FuzzyError, Result};
use crate::symbol::Symbol;

/// Longest pattern one machine word can hold.
pub const MAX_PATTERN_LEN: usize = 64;

/// Match masks for one pattern, reusable across many texts.
#[derive(Debug, Clone)]
pub struct MyersPattern<S> {
    peq: AHashMap<S, u64>,
    len: usize,
}

impl<S: Symbol> Default for MyersPattern<S> {
    fn default() -> Self {
        Self {
            peq: AHashMap::new(),
            len: 0,
        }
    }
}

impl<S: Symbol> MyersPattern<S> {
    pub fn new(pattern: &[S]) -> Result<Self> {
        let mut compiled = Self::default();
        compiled.reset(pattern)?;
        Ok(compiled)
    }

    /// Recompile in place, keeping the allocation.
    pub fn reset(&mut self, pattern: &[S]) -> Result<()> {
        if pattern.len() > MAX_PATTERN_LEN {
            return Err(FuzzyError::PatternTooLong {
                len: pattern.len(),
                max: MAX_PATTERN_LEN,
            });
        }
        self.peq.clear();
        for (i, &s) in pattern.iter().enumerate() {
            *self.peq.entry(s).or_insert(0) |= 1u64 << i;
        }
        self.len = pattern.len();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn mask(&self, s: S) -> u64 {
        self.peq.get(&s).copied().unwrap_or(0)
    }

    /// Distance from the compiled pattern to `text`.
    pub fn distance(&self, text: &[S], allow_transposition: bool) -> u32 {
        let m = self.len;
        if m == 0 {
            return text.len() as u32;
        }
        let last = 1u64 << (m - 1);

        let mut vp: u64 = u64::MAX;
        let mut vn: u64 = 0;
        let mut d0_prev: u64 = 0;
        let mut eq_prev: u64 = 0;
        let mut score = m as u32;

        for &s in text {
            let eq = self.mask(s);
            let tr = if allow_transposition {
                ((!d0_prev & eq) << 1) & eq_prev
            } else {
                0
            };
            let d0 = (((eq & vp).wrapping_add(vp)) ^ vp) | eq | vn | tr;
            let hp = vn | !(vp | d0);
            let hn = vp & d0;

            if hp & last != 0 {
                score += 1;
            } else if hn & last != 0 {
                score -= 1;
            }

            // Row 0 of a global alignment grows by one per text symbol.
            let x = (hp << 1) | 1;
            vn = x & d0;
            vp = (hn << 1) | !(x | d0);

            d0_prev = d0;
            eq_prev = eq;
        }

        score
    }
}

/// One-shot bit-parallel distance between `pattern` and `text`.
pub fn bit_parallel_distance<S: Symbol>(
    pattern: &[S],
    text: &[S],
    allow_transposition: bool,
) -> Result<u32> {
    Ok(MyersPattern::new(pattern)?.distance(text, allow_transposition))
}
