// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line-level I/O with checksumming.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crc32fast::Hasher as Crc32Hasher;

use crate::error::{FuzzyError, Result};

/// Reads `\n`-terminated lines, counting them for error messages and
/// checksumming every byte consumed.
pub(crate) struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    line: usize,
    hasher: Crc32Hasher,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            line: 0,
            hasher: Crc32Hasher::new(),
        }
    }

    /// 1-based number of the line read last.
    pub(crate) fn line_number(&self) -> usize {
        self.line
    }

    fn advance(&mut self) -> Result<()> {
        self.buf.clear();
        self.line += 1;
        let n = self.inner.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Err(FuzzyError::malformed(self.line, "unexpected end of file"));
        }
        self.hasher.update(&self.buf);
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        Ok(())
    }

    /// Raw bytes of the next line, without the terminator.
    pub(crate) fn next_line(&mut self) -> Result<&[u8]> {
        self.advance()?;
        Ok(&self.buf)
    }

    fn text(&self, what: &str) -> Result<&str> {
        std::str::from_utf8(&self.buf)
            .map(str::trim)
            .map_err(|_| FuzzyError::malformed(self.line, format!("{what} is not valid UTF-8")))
    }

    /// Next line as a single number.
    pub(crate) fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        self.advance()?;
        let text = self.text(what)?;
        text.parse()
            .map_err(|_| FuzzyError::malformed(self.line, format!("expected {what}, found {text:?}")))
    }

    /// Next line as whitespace-separated numbers.
    pub(crate) fn numbers<T: FromStr>(&mut self, what: &str) -> Result<Vec<T>> {
        self.advance()?;
        let text = self.text(what)?;
        text.split_ascii_whitespace()
            .map(|token| {
                token.parse().map_err(|_| {
                    FuzzyError::malformed(self.line, format!("expected {what}, found {token:?}"))
                })
            })
            .collect()
    }

    /// CRC32 of everything read so far.
    pub(crate) fn checksum(&self) -> u32 {
        self.hasher.clone().finalize()
    }
}

/// Passes writes through while checksumming them.
pub(crate) struct Crc32Writer<W> {
    inner: W,
    hasher: Crc32Hasher,
}

impl<W: Write> Crc32Writer<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Crc32Hasher::new(),
        }
    }

    pub(crate) fn checksum(&self) -> u32 {
        self.hasher.clone().finalize()
    }
}

impl<W: Write> Write for Crc32Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
