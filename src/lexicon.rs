// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text in, suggestions out.
//!
//! [`Lexicon`] is the front door for callers holding raw user input. It
//! normalizes words the same way on both sides, so "Café", "cafe" and "CAFÉ"
//! all meet at `cafe`, then maps matched ids back to display strings.

use std::path::Path;

use serde::Serialize;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::error::Result;
use crate::fuzzy::{edit_distance, extension_distance};
use crate::index::FastSsIndex;
use crate::symbol::Symbol;
use crate::types::{IndexConfig, QueryStats};

/// Lowercase and strip diacritics.
///
/// - "café" → "cafe"
/// - "Harīṣh" → "harish"
/// - "naïve" → "naive"
///
/// Without the `unicode-normalization` feature only lowercasing is applied.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// One suggested word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub word: String,
    pub distance: u32,
}

/// A normalized vocabulary and its index.
#[derive(Debug, Clone)]
pub struct Lexicon {
    index: FastSsIndex<char>,
}

impl Lexicon {
    /// Normalize, sort and deduplicate `words`, then index them.
    pub fn build<T: AsRef<str>>(config: IndexConfig, words: &[T]) -> Result<Self> {
        let mut vocabulary: Vec<Vec<char>> = words
            .iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .map(|w| w.chars().collect())
            .collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        let index = FastSsIndex::from_vocabulary(config, vocabulary)?;
        Ok(Self { index })
    }

    /// Wrap an index whose vocabulary is already normalized.
    pub fn from_index(index: FastSsIndex<char>) -> Self {
        Self { index }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            index: FastSsIndex::open(path)?,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<u32> {
        self.index.save_to_file(path)
    }

    pub fn index(&self) -> &FastSsIndex<char> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether the normalized form of `raw` is a vocabulary word.
    pub fn contains(&self, raw: &str) -> bool {
        let word: Vec<char> = normalize(raw).chars().collect();
        self.index.in_vocabulary(&word)
    }

    /// Suggestions for `raw`, nearest first.
    pub fn search(&mut self, raw: &str) -> Result<Vec<Suggestion>> {
        let query: Vec<char> = normalize(raw).chars().collect();
        let result = self.index.find_closest_words(&query)?;
        Ok(result
            .matches
            .iter()
            .filter_map(|m| {
                self.index.word(m.word_id).map(|w| Suggestion {
                    word: char::render(w),
                    distance: m.distance,
                })
            })
            .collect())
    }

    /// Counters of the last [`Lexicon::search`].
    pub fn last_query_stats(&self) -> QueryStats {
        self.index.last_query_stats()
    }

    /// Unbounded distance between two display words under this lexicon's
    /// mode: extension distance of `a` against prefixes of `b` in completion
    /// matching, plain edit distance otherwise.
    pub fn distance(&self, a: &str, b: &str) -> u32 {
        let a: Vec<char> = normalize(a).chars().collect();
        let b: Vec<char> = normalize(b).chars().collect();
        if self.index.mode().is_completion() {
            extension_distance(&a, &b, a.len() as u32)
        } else {
            edit_distance(&a, &b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mode, Threshold};

    #[test]
    fn normalization_folds_case() {
        assert_eq!(normalize("  ALGORITHM "), "algorithm");
    }

    #[cfg(feature = "unicode-normalization")]
    #[test]
    fn normalization_strips_diacritics() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("Harīṣh"), "harish");
        assert_eq!(normalize("naïve"), "naive");
    }

    #[test]
    fn search_returns_display_words() {
        let config = IndexConfig::new(Mode::WordMatchingFull, Threshold::Fixed(1));
        let mut lexicon = Lexicon::build(config, &["Cat", "cart", "dog", "cat", ""]).unwrap();
        assert_eq!(lexicon.len(), 3);
        assert!(lexicon.contains("CAT"));

        let got = lexicon.search("Cst").unwrap();
        assert_eq!(
            got,
            vec![Suggestion {
                word: "cat".into(),
                distance: 1
            }]
        );
    }

    #[test]
    fn distance_follows_mode() {
        let words = ["kitten"];
        let edit = Lexicon::build(IndexConfig::new(Mode::WordMatchingFull, Threshold::Fixed(1)), &words).unwrap();
        let completion =
            Lexicon::build(IndexConfig::new(Mode::CompletionMatching, Threshold::Fixed(1)), &words).unwrap();
        assert_eq!(edit.distance("kit", "kitten"), 3);
        assert_eq!(completion.distance("kit", "kitten"), 0);
        assert_eq!(completion.distance("kot", "kitten"), 1);
    }
}
