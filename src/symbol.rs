// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The alphabet the index is generic over.
//!
//! The engine only needs symbols to be comparable and hashable. Text encoding
//! is a boundary concern: words enter as `&str` or raw bytes and leave as bytes
//! on disk, and that conversion lives here so nothing inside the index or the
//! distance kernels ever looks at UTF-8.
//!
//! | Symbol | Word type   | On-disk line       |
//! |--------|-------------|--------------------|
//! | `u8`   | byte string | raw bytes          |
//! | `char` | scalar text | UTF-8 encoded      |

use std::fmt::Debug;
use std::hash::Hash;

/// A unit of the vocabulary alphabet.
pub trait Symbol: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Histogram bucket used by the letter-overlap filter.
    ///
    /// Distinct symbols may share a bucket. Sharing can only make two words
    /// look more alike, never less, so the filter stays lossless.
    fn bucket(self) -> u8;

    /// Whether this symbol would break the line-oriented index format.
    fn is_line_break(self) -> bool;

    /// Split text into symbols.
    fn from_text(text: &str) -> Vec<Self>;

    /// Append the on-disk encoding of `word` to `out`.
    fn encode(word: &[Self], out: &mut Vec<u8>);

    /// Decode one on-disk line. `None` if the bytes are not a valid word.
    fn decode(line: &[u8]) -> Option<Vec<Self>>;

    /// Human-readable rendering for the CLI and log messages.
    fn render(word: &[Self]) -> String;
}

impl Symbol for u8 {
    #[inline]
    fn bucket(self) -> u8 {
        self
    }

    #[inline]
    fn is_line_break(self) -> bool {
        self == b'\n'
    }

    fn from_text(text: &str) -> Vec<Self> {
        text.as_bytes().to_vec()
    }

    fn encode(word: &[Self], out: &mut Vec<u8>) {
        out.extend_from_slice(word);
    }

    fn decode(line: &[u8]) -> Option<Vec<Self>> {
        Some(line.to_vec())
    }

    fn render(word: &[Self]) -> String {
        String::from_utf8_lossy(word).into_owned()
    }
}

impl Symbol for char {
    #[inline]
    fn bucket(self) -> u8 {
        // Low byte of the scalar value. ASCII letters keep their own bucket.
        (u32::from(self) & 0xFF) as u8
    }

    #[inline]
    fn is_line_break(self) -> bool {
        self == '\n'
    }

    fn from_text(text: &str) -> Vec<Self> {
        text.chars().collect()
    }

    fn encode(word: &[Self], out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        for &c in word {
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    fn decode(line: &[u8]) -> Option<Vec<Self>> {
        std::str::from_utf8(line).ok().map(|s| s.chars().collect())
    }

    fn render(word: &[Self]) -> String {
        word.iter().collect()
    }
}

/// Convert a list of text words into symbol words.
pub fn words_from_text<S: Symbol, T: AsRef<str>>(words: &[T]) -> Vec<Vec<S>> {
    words.iter().map(|w| S::from_text(w.as_ref())).collect()
}
