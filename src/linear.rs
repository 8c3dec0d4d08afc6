// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Brute force: compare the query with every word.
//!
//! No index, no filters, one bounded distance per word. Slow, but obviously
//! correct, which makes it the reference the deletion index is checked
//! against in tests and by `fastss verify`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;

use crate::algorithm::FuzzySearchAlgorithm;
use crate::error::{FuzzyError, Result};
use crate::format::{read_index, write_index, IndexHeader};
use crate::fuzzy::{bounded_edit_distance, extension_distance};
use crate::index::{in_vocabulary, MAX_VOCABULARY};
use crate::search::{prepare_query, sort_matches};
use crate::symbol::Symbol;
use crate::types::{ClosestWords, DistanceKind, IndexConfig, Match, Mode, Threshold, VocabularyOrder};

/// Linear-scan engine over an owned vocabulary.
#[derive(Debug, Clone)]
pub struct LinearScan<S> {
    config: IndexConfig,
    vocabulary: Vec<Vec<S>>,
    order: VocabularyOrder,
}

impl<S: Symbol> LinearScan<S> {
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            vocabulary: Vec::new(),
            order: VocabularyOrder::Ascending,
        })
    }

    pub fn from_vocabulary(config: IndexConfig, vocabulary: Vec<Vec<S>>) -> Result<Self> {
        let mut scan = Self::new(config)?;
        scan.build_index(vocabulary, false)?;
        Ok(scan)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Matches of `query` without touching `self`.
    pub fn search(&self, query: &[S]) -> Result<ClosestWords> {
        let query = prepare_query(self.config.mode, query)?;
        let in_vocabulary = in_vocabulary(&self.vocabulary, self.order, query);
        if query.is_empty() {
            return Ok(ClosestWords {
                in_vocabulary,
                matches: Vec::new(),
            });
        }

        let k = self.config.threshold.for_query(query.len());
        let completion = self.config.mode.is_completion();
        let mut matches: Vec<Match> = self
            .vocabulary
            .iter()
            .enumerate()
            .filter_map(|(id, word)| {
                let distance = if completion {
                    extension_distance(query, word, k)
                } else {
                    bounded_edit_distance(query, word, k)
                };
                (distance <= k).then_some(Match {
                    word_id: id as u32,
                    distance,
                })
            })
            .collect();
        sort_matches(&mut matches);

        Ok(ClosestWords {
            in_vocabulary,
            matches,
        })
    }
}

impl<S: Symbol> FuzzySearchAlgorithm<S> for LinearScan<S> {
    fn build_index(&mut self, vocabulary: Vec<Vec<S>>, _reserve_memory: bool) -> Result<()> {
        if vocabulary.len() > MAX_VOCABULARY {
            return Err(FuzzyError::VocabularyTooLarge {
                size: vocabulary.len(),
                max: MAX_VOCABULARY,
            });
        }
        self.order = VocabularyOrder::detect(&vocabulary);
        self.vocabulary = vocabulary;
        info!("linear scan over {} words ({})", self.vocabulary.len(), self.config.mode);
        Ok(())
    }

    fn find_closest_words(&mut self, query: &[S]) -> Result<ClosestWords> {
        self.search(query)
    }

    /// Writes the vocabulary with empty deletion and range sections, so any
    /// loader of the format accepts it.
    fn save_to_file(&self, path: &Path) -> Result<u32> {
        let header = IndexHeader {
            threshold: self.config.threshold,
            vocabulary_size: self.vocabulary.len(),
            entry_count: 0,
            prefix_range_count: 0,
            mode: self.config.mode,
            truncate_length: self.config.truncate_length,
        };
        let file = File::create(path)?;
        write_index(BufWriter::new(file), &header, &self.vocabulary, &[], &[])
    }

    /// Reads any index file and keeps only its vocabulary and parameters.
    fn load_from_file(&mut self, path: &Path) -> Result<&[Vec<S>]> {
        let file = read_index::<S, _>(BufReader::new(File::open(path)?))?;
        let config = IndexConfig {
            mode: file.header.mode,
            threshold: file.header.threshold,
            truncate_length: file.header.truncate_length,
            distance_engine: self.config.distance_engine,
        };
        config.validate()?;
        self.config = config;
        self.order = VocabularyOrder::detect(&file.vocabulary);
        self.vocabulary = file.vocabulary;
        Ok(&self.vocabulary)
    }

    fn threshold(&self) -> Threshold {
        self.config.threshold
    }

    fn distance_kind(&self) -> DistanceKind {
        self.config.mode.distance_kind()
    }

    fn mode(&self) -> Mode {
        self.config.mode
    }

    fn vocabulary(&self) -> &[Vec<S>] {
        &self.vocabulary
    }
}
