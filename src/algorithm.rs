// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The contract every fuzzy search engine fulfils.
//!
//! Callers that only need "build, query, persist" program against
//! [`FuzzySearchAlgorithm`] and can swap the deletion index for the linear
//! scan without other changes.

use std::path::Path;

use crate::error::Result;
use crate::index::FastSsIndex;
use crate::symbol::Symbol;
use crate::types::{ClosestWords, DistanceKind, Mode, Threshold};

pub trait FuzzySearchAlgorithm<S: Symbol> {
    /// Index `vocabulary`, replacing anything built before. `reserve_memory`
    /// asks for an exact pre-sizing pass where the engine has one.
    fn build_index(&mut self, vocabulary: Vec<Vec<S>>, reserve_memory: bool) -> Result<()>;

    /// Every vocabulary word within threshold of `query`, nearest first.
    fn find_closest_words(&mut self, query: &[S]) -> Result<ClosestWords>;

    /// Persist. Returns the CRC32 of the written bytes.
    fn save_to_file(&self, path: &Path) -> Result<u32>;

    /// Replace the engine state with a saved one and return its vocabulary.
    fn load_from_file(&mut self, path: &Path) -> Result<&[Vec<S>]>;

    fn threshold(&self) -> Threshold;

    fn distance_kind(&self) -> DistanceKind;

    fn mode(&self) -> Mode;

    fn vocabulary(&self) -> &[Vec<S>];

    /// Whether matches are measured against word prefixes.
    fn completion_matching(&self) -> bool {
        self.mode().is_completion()
    }
}

impl<S: Symbol> FuzzySearchAlgorithm<S> for FastSsIndex<S> {
    fn build_index(&mut self, vocabulary: Vec<Vec<S>>, reserve_memory: bool) -> Result<()> {
        self.build(vocabulary, reserve_memory)
    }

    fn find_closest_words(&mut self, query: &[S]) -> Result<ClosestWords> {
        FastSsIndex::find_closest_words(self, query)
    }

    fn save_to_file(&self, path: &Path) -> Result<u32> {
        FastSsIndex::save_to_file(self, path)
    }

    fn load_from_file(&mut self, path: &Path) -> Result<&[Vec<S>]> {
        FastSsIndex::load_from_file(self, path)
    }

    fn threshold(&self) -> Threshold {
        FastSsIndex::threshold(self)
    }

    fn distance_kind(&self) -> DistanceKind {
        FastSsIndex::distance_kind(self)
    }

    fn mode(&self) -> Mode {
        FastSsIndex::mode(self)
    }

    fn vocabulary(&self) -> &[Vec<S>] {
        FastSsIndex::vocabulary(self)
    }
}
