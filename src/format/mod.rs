// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The line-oriented index file.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ header (7 lines)             │  tag, threshold, counts, mode, truncation
//! ├──────────────────────────────┤
//! │ vocabulary (1 word / line)   │  line i = word id i
//! ├──────────────────────────────┤
//! │ deletion map                 │  key line, then "<n> <gid_1> ... <gid_n>"
//! │   (keys in sorted order)     │
//! ├──────────────────────────────┤
//! │ prefix ranges (1 / line)     │  packed u32, line i = group id i
//! └──────────────────────────────┘
//! ```
//!
//! Keys are written sorted so the same index always serializes to the same
//! bytes. The CRC32 of those bytes is the index fingerprint.
//!
//! Loading trusts nothing: every count, id and range is checked against the
//! header before it can be used to index anything.

mod header;
mod lines;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

pub use header::{IndexHeader, FORMAT_TAG, HEADER_LINES};
pub(crate) use lines::{Crc32Writer, LineReader};

use crate::error::{FuzzyError, Result};
use crate::index::{DeletionMap, FastSsIndex, PrefixRange, MAX_VOCABULARY};
use crate::symbol::Symbol;
use crate::types::IndexConfig;

/// Header counts are not trusted for allocation beyond this many items; larger
/// sections grow as their lines are actually read.
const PREALLOCATE_LIMIT: usize = 1 << 20;

/// Everything an index file holds.
#[derive(Debug)]
pub(crate) struct IndexFile<S> {
    pub header: IndexHeader,
    pub vocabulary: Vec<Vec<S>>,
    pub deletions: DeletionMap<S>,
    pub prefix_ranges: Vec<PrefixRange>,
    pub fingerprint: u32,
}

/// Serialize the sections. Returns the CRC32 of the bytes written.
pub(crate) fn write_index<S: Symbol, W: Write>(
    writer: W,
    header: &IndexHeader,
    vocabulary: &[Vec<S>],
    entries: &[(&Vec<S>, &Vec<u32>)],
    prefix_ranges: &[PrefixRange],
) -> Result<u32> {
    if let Some(word_id) = vocabulary
        .iter()
        .position(|w| w.iter().any(|s| s.is_line_break()))
    {
        return Err(FuzzyError::UnsupportedWord {
            word_id,
            reason: "contains a line break",
        });
    }

    let mut w = Crc32Writer::new(writer);
    header.write(&mut w)?;

    let mut line = Vec::new();
    for word in vocabulary {
        line.clear();
        S::encode(word, &mut line);
        line.push(b'\n');
        w.write_all(&line)?;
    }

    for (key, groups) in entries {
        line.clear();
        S::encode(key, &mut line);
        line.push(b'\n');
        w.write_all(&line)?;

        write!(w, "{}", groups.len())?;
        for gid in groups.iter() {
            write!(w, " {gid}")?;
        }
        writeln!(w)?;
    }

    for range in prefix_ranges {
        writeln!(w, "{}", range.bits())?;
    }

    w.flush()?;
    Ok(w.checksum())
}

/// Parse and validate an index file.
pub(crate) fn read_index<S: Symbol, R: BufRead>(reader: R) -> Result<IndexFile<S>> {
    let mut r = LineReader::new(reader);
    let header = IndexHeader::read(&mut r)?;

    if header.vocabulary_size > MAX_VOCABULARY {
        return Err(FuzzyError::VocabularyTooLarge {
            size: header.vocabulary_size,
            max: MAX_VOCABULARY,
        });
    }

    let mut vocabulary = Vec::with_capacity(header.vocabulary_size.min(PREALLOCATE_LIMIT));
    for _ in 0..header.vocabulary_size {
        let bytes = r.next_line()?;
        let word = S::decode(bytes)
            .ok_or_else(|| FuzzyError::malformed(r.line_number(), "word is not valid for this alphabet"))?;
        vocabulary.push(word);
    }

    let mut deletions = DeletionMap::with_capacity(header.entry_count.min(PREALLOCATE_LIMIT));
    for _ in 0..header.entry_count {
        let bytes = r.next_line()?;
        let key = S::decode(bytes)
            .ok_or_else(|| FuzzyError::malformed(r.line_number(), "key is not valid for this alphabet"))?;
        let key_line = r.line_number();

        let mut numbers: Vec<u32> = r.numbers("posting list")?;
        let line = r.line_number();
        if numbers.is_empty() {
            return Err(FuzzyError::malformed(line, "missing posting count"));
        }
        let count = numbers.remove(0) as usize;
        if count == 0 || count != numbers.len() {
            return Err(FuzzyError::malformed(
                line,
                format!("posting count {count} does not match {} ids", numbers.len()),
            ));
        }
        if let Some(&gid) = numbers
            .iter()
            .find(|&&gid| gid as usize >= header.prefix_range_count)
        {
            return Err(FuzzyError::malformed(
                line,
                format!("group id {gid} out of range ({} prefix ranges)", header.prefix_range_count),
            ));
        }
        if deletions.insert(key, numbers).is_some() {
            return Err(FuzzyError::malformed(key_line, "duplicate deletion key"));
        }
    }

    let mut prefix_ranges = Vec::with_capacity(header.prefix_range_count.min(PREALLOCATE_LIMIT));
    for _ in 0..header.prefix_range_count {
        let range = PrefixRange::from_bits(r.number("prefix range")?);
        if range.last() as usize >= header.vocabulary_size {
            return Err(FuzzyError::malformed(
                r.line_number(),
                format!(
                    "prefix range {}..={} exceeds vocabulary of {}",
                    range.first(),
                    range.last(),
                    header.vocabulary_size
                ),
            ));
        }
        prefix_ranges.push(range);
    }

    Ok(IndexFile {
        header,
        vocabulary,
        deletions,
        prefix_ranges,
        fingerprint: r.checksum(),
    })
}

/// CRC32 of a file on disk, for comparing against an index fingerprint.
pub fn file_fingerprint(path: impl AsRef<Path>) -> Result<u32> {
    let bytes = std::fs::read(path)?;
    Ok(crc32fast::hash(&bytes))
}

impl<S: Symbol> FastSsIndex<S> {
    /// Header describing this index as it would be saved.
    pub fn header(&self) -> IndexHeader {
        IndexHeader {
            threshold: self.config.threshold,
            vocabulary_size: self.vocabulary.len(),
            entry_count: self.deletions.len(),
            prefix_range_count: self.prefix_ranges.len(),
            mode: self.config.mode,
            truncate_length: self.config.truncate_length,
        }
    }

    /// Serialize to any writer. Returns the fingerprint.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<u32> {
        let entries = self.sorted_entries();
        write_index(
            writer,
            &self.header(),
            &self.vocabulary,
            &entries,
            &self.prefix_ranges,
        )
    }

    /// Save to `path`. Returns the fingerprint.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<u32> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let fingerprint = self.write_to(BufWriter::new(file))?;
        info!(
            "saved {} words and {} keys to {} (crc32 {:08x})",
            self.vocabulary.len(),
            self.deletions.len(),
            path.display(),
            fingerprint
        );
        Ok(fingerprint)
    }

    /// Replace this index with one read from `reader`.
    ///
    /// Mode, threshold and truncate length come from the file; the distance
    /// engine stays as configured.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let file = read_index::<S, R>(reader)?;
        let config = IndexConfig {
            mode: file.header.mode,
            threshold: file.header.threshold,
            truncate_length: file.header.truncate_length,
            distance_engine: self.config.distance_engine,
        };
        config.validate()?;

        self.clear();
        self.config = config;
        self.vocabulary = file.vocabulary;
        self.deletions = file.deletions;
        self.prefix_ranges = file.prefix_ranges;
        self.finish();
        self.fingerprint = Some(file.fingerprint);
        Ok(())
    }

    /// Replace this index with the one saved at `path` and return its
    /// vocabulary.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<&[Vec<S>]> {
        let path = path.as_ref();
        let file = File::open(path)?;
        self.read_from(BufReader::new(file))?;
        info!(
            "loaded {} words, {} keys, {} prefix ranges from {}",
            self.vocabulary.len(),
            self.deletions.len(),
            self.prefix_ranges.len(),
            path.display()
        );
        Ok(&self.vocabulary)
    }

    /// Open a saved index with the default distance engine.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut index = Self::new(IndexConfig::default())?;
        index.load_from_file(path)?;
        Ok(index)
    }
}
