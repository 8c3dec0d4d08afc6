// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction.
//!
//! The count pass and the insert pass walk exactly the same neighborhoods. The
//! count pass only learns how many distinct groups each key will hold, so the
//! insert pass can allocate every posting list at its final size up front.

use ahash::AHashMap;
use log::{debug, info, warn};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use super::neighborhood::{for_each_deletion, neighborhood_size};
use super::prefix_range::{compute_prefix_groups, PrefixGroup, MAX_VOCABULARY};
use super::{DeletionMap, FastSsIndex};
use crate::error::{FuzzyError, Result};
use crate::symbol::Symbol;
use crate::types::{BuildPhase, VocabularyOrder};

/// What the count pass remembers per key.
#[derive(Debug, Clone, Copy)]
struct CountSlot {
    groups: u32,
    last: u32,
}

/// Build progress bars, drawn only when asked for.
#[cfg(feature = "parallel")]
struct Progress(Option<ProgressBar>);

#[cfg(feature = "parallel")]
impl Progress {
    fn new(show: bool, len: usize, prefix: &'static str) -> Self {
        let bar = show.then(|| {
            let bar = ProgressBar::new(len as u64);
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
            ) {
                bar.set_style(style.progress_chars("━━╸"));
            }
            bar.set_prefix(prefix);
            bar
        });
        Progress(bar)
    }

    #[inline]
    fn inc(&self) {
        if let Some(bar) = &self.0 {
            bar.inc(1);
        }
    }

    fn finish(&self, message: String) {
        if let Some(bar) = &self.0 {
            bar.finish_with_message(message);
        }
    }
}

#[cfg(not(feature = "parallel"))]
struct Progress;

#[cfg(not(feature = "parallel"))]
impl Progress {
    fn new(_show: bool, _len: usize, _prefix: &'static str) -> Self {
        Progress
    }

    #[inline]
    fn inc(&self) {}

    fn finish(&self, _message: String) {}
}

impl<S: Symbol> FastSsIndex<S> {
    /// Index `vocabulary`, replacing anything built before.
    ///
    /// With `reserve_memory` a counting pass sizes every posting list before
    /// the real insert pass, trading build time for peak memory.
    pub fn build(&mut self, vocabulary: Vec<Vec<S>>, reserve_memory: bool) -> Result<()> {
        self.config.validate()?;
        if vocabulary.len() > MAX_VOCABULARY {
            return Err(FuzzyError::VocabularyTooLarge {
                size: vocabulary.len(),
                max: MAX_VOCABULARY,
            });
        }

        self.clear();
        self.vocabulary = vocabulary;

        if self.vocabulary.is_empty() {
            warn!("empty vocabulary passed for indexing; every query will come back empty");
            self.finish();
            return Ok(());
        }

        match VocabularyOrder::detect(&self.vocabulary) {
            VocabularyOrder::Unsorted => warn!(
                "vocabulary is not sorted; prefix groups will be small and membership checks linear"
            ),
            VocabularyOrder::Descending if !self.config.mode.is_completion() => {
                debug!("vocabulary is sorted in descending order")
            }
            _ => {}
        }

        info!(
            "indexing {} words: {}, threshold {}, truncate length {}",
            self.vocabulary.len(),
            self.config.mode,
            self.config.threshold,
            self.config.truncate_length
        );

        self.phase = BuildPhase::CountingPrefixes;
        let groups = compute_prefix_groups(
            &self.vocabulary,
            self.config.mode,
            self.config.truncate_length,
            self.config.threshold,
        );
        self.prefix_ranges = groups.iter().map(|g| g.range).collect();
        debug!("{} prefix ranges", groups.len());

        let mut deletions = if reserve_memory {
            self.phase = BuildPhase::CountingSpace;
            let progress = Progress::new(self.show_progress, groups.len(), "Counting");
            let counts = count_space(&self.vocabulary, &groups, &progress);
            progress.finish(format!("{} keys", counts.len()));
            reserve(counts)
        } else {
            DeletionMap::default()
        };

        self.phase = BuildPhase::Indexing;
        let progress = Progress::new(self.show_progress, groups.len(), "Indexing");
        insert_all(&self.vocabulary, &groups, &mut deletions, &progress);
        progress.finish(format!("{} keys", deletions.len()));
        self.deletions = deletions;

        self.finish();
        info!(
            "index ready: {} keys, {} postings ({} pointers visited), {} single-posting keys",
            self.stats.entries,
            self.stats.postings,
            neighborhood_visits(&groups),
            self.stats.single_posting_entries
        );
        Ok(())
    }
}

/// The symbols a group is keyed by.
#[inline]
fn group_key<'a, S>(vocabulary: &'a [Vec<S>], group: &PrefixGroup) -> &'a [S] {
    let word = &vocabulary[group.range.first() as usize];
    &word[..group.key_len]
}

fn count_space<S: Symbol>(
    vocabulary: &[Vec<S>],
    groups: &[PrefixGroup],
    progress: &Progress,
) -> AHashMap<Vec<S>, CountSlot> {
    let mut counts: AHashMap<Vec<S>, CountSlot> = AHashMap::new();
    for (gid, group) in groups.iter().enumerate() {
        let gid = gid as u32;
        let key = group_key(vocabulary, group);
        for_each_deletion(key, 0, 0, group.depth, &mut |s: &[S], _| match counts.get_mut(s) {
            Some(slot) => {
                if slot.last != gid {
                    slot.groups += 1;
                    slot.last = gid;
                }
            }
            None => {
                counts.insert(s.to_vec(), CountSlot { groups: 1, last: gid });
            }
        });
        progress.inc();
    }
    counts
}

fn reserve<S: Symbol>(counts: AHashMap<Vec<S>, CountSlot>) -> DeletionMap<S> {
    let mut map = DeletionMap::with_capacity(counts.len());
    for (key, slot) in counts {
        map.insert(key, Vec::with_capacity(slot.groups as usize));
    }
    map
}

/// Keys the deletion traversal visits over all groups, repeats included.
fn neighborhood_visits(groups: &[PrefixGroup]) -> usize {
    groups
        .iter()
        .map(|g| neighborhood_size(g.key_len, g.depth))
        .sum()
}

/// Insert every group's neighborhood.
fn insert_all<S: Symbol>(
    vocabulary: &[Vec<S>],
    groups: &[PrefixGroup],
    map: &mut DeletionMap<S>,
    progress: &Progress,
) {
    for (gid, group) in groups.iter().enumerate() {
        let gid = gid as u32;
        let key = group_key(vocabulary, group);
        for_each_deletion(key, 0, 0, group.depth, &mut |s: &[S], _| {
            match map.get_mut(s) {
                Some(list) => {
                    // Groups are inserted in order, so a repeat is always last.
                    if list.last() != Some(&gid) {
                        list.push(gid);
                    }
                }
                None => {
                    map.insert(s.to_vec(), vec![gid]);
                }
            }
        });
        progress.inc();
    }
}
