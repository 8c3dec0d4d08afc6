// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The seven header lines of an index file.
//!
//! ```text
//! 1            format tag
//! -1.000000    threshold (negative = dynamic)
//! 120000       vocabulary size
//! 4012345      deletion map entries
//! 38211        prefix ranges
//! 3            mode
//! 7            truncate length
//! ```
//!
//! The header is read before anything else and tells the loader how many lines
//! of each section follow, so the sections can be allocated up front.

use std::io::{self, Write};

use super::lines::LineReader;
use crate::error::{FuzzyError, Result};
use crate::types::{Mode, Threshold};

/// Format tag on line 1.
pub const FORMAT_TAG: u32 = 1;

/// Number of header lines.
pub const HEADER_LINES: usize = 7;

/// Section sizes and index parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexHeader {
    pub threshold: Threshold,
    pub vocabulary_size: usize,
    pub entry_count: usize,
    pub prefix_range_count: usize,
    pub mode: Mode,
    pub truncate_length: usize,
}

impl IndexHeader {
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{FORMAT_TAG}")?;
        writeln!(w, "{:.6}", self.threshold.to_file_value())?;
        writeln!(w, "{}", self.vocabulary_size)?;
        writeln!(w, "{}", self.entry_count)?;
        writeln!(w, "{}", self.prefix_range_count)?;
        writeln!(w, "{}", self.mode.code())?;
        writeln!(w, "{}", self.truncate_length)?;
        Ok(())
    }

    pub(crate) fn read<R: io::BufRead>(r: &mut LineReader<R>) -> Result<Self> {
        let tag: u32 = r.number("format tag")?;
        if tag != FORMAT_TAG {
            return Err(FuzzyError::malformed(
                r.line_number(),
                format!("unsupported format tag {tag}"),
            ));
        }

        let threshold_value: f64 = r.number("threshold")?;
        let threshold = Threshold::from_file_value(threshold_value)
            .map_err(|e| FuzzyError::malformed(r.line_number(), e.to_string()))?;
        let vocabulary_size = r.number("vocabulary size")?;
        let entry_count = r.number("deletion map entry count")?;
        let prefix_range_count = r.number("prefix range count")?;
        let mode_code: i64 = r.number("mode")?;
        let mode = Mode::try_from(mode_code)
            .map_err(|e| FuzzyError::malformed(r.line_number(), e.to_string()))?;
        let truncate_length: usize = r.number("truncate length")?;
        if truncate_length == 0 {
            return Err(FuzzyError::malformed(
                r.line_number(),
                "truncate length must be at least 1",
            ));
        }

        Ok(Self {
            threshold,
            vocabulary_size,
            entry_count,
            prefix_range_count,
            mode,
            truncate_length,
        })
    }
}
