// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A read-only index shared between threads.
//!
//! The index never changes after it is built, so it sits behind an `Arc`.
//! Scratch state is the only thing a query writes; a small pool hands each
//! caller its own and takes it back afterwards.

use std::sync::Arc;

use parking_lot::Mutex;

use super::QueryScratch;
use crate::error::Result;
use crate::index::FastSsIndex;
use crate::symbol::Symbol;
use crate::types::ClosestWords;

/// Thread-safe query front end for a built index.
#[derive(Debug, Clone)]
pub struct SharedSearcher<S: Symbol> {
    index: Arc<FastSsIndex<S>>,
    pool: Arc<Mutex<Vec<QueryScratch<S>>>>,
}

impl<S: Symbol> SharedSearcher<S> {
    pub fn new(index: FastSsIndex<S>) -> Self {
        Self::from_arc(Arc::new(index))
    }

    pub fn from_arc(index: Arc<FastSsIndex<S>>) -> Self {
        Self {
            index,
            pool: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn index(&self) -> &FastSsIndex<S> {
        &self.index
    }

    pub fn find_closest_words(&self, query: &[S]) -> Result<ClosestWords> {
        let mut scratch = self.pool.lock().pop().unwrap_or_default();
        let result = self.index.find_closest_words_with(query, &mut scratch);
        self.pool.lock().push(scratch);
        result
    }

    /// Scratch states currently parked in the pool.
    pub fn pooled(&self) -> usize {
        self.pool.lock().len()
    }
}
