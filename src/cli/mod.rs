// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the fastss command-line interface.
//!
//! Four subcommands: `build` indexes a word list, `query` looks words up,
//! `inspect` prints what an index file holds, and `verify` checks an index
//! against a linear scan of its own vocabulary.

pub mod display;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use fastss::Mode;

#[derive(Parser)]
#[command(
    name = "fastss",
    about = "Deletion-neighborhood fuzzy word index",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// `--mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Index whole words
    Full,
    /// Index word prefixes of the truncate length
    Truncated,
    /// Prefix completion by extension distance
    Completion,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Full => Mode::WordMatchingFull,
            ModeArg::Truncated => Mode::WordMatchingTruncated,
            ModeArg::Completion => Mode::CompletionMatching,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a word list (one word per line)
    Build {
        /// Word list to index
        #[arg(short, long)]
        input: PathBuf,

        /// Index file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Indexing mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Fixed threshold 0..=3; omit for the length-dependent schedule
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Prefix length indexed by the truncated and completion modes
        #[arg(long)]
        truncate: Option<usize>,

        /// JSON configuration file; flags given on the command line win
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip the exact pre-sizing pass
        #[arg(long)]
        no_reserve: bool,

        /// Sort and deduplicate the word list before indexing
        #[arg(long)]
        sort: bool,
    },

    /// Look up words in an index
    Query {
        /// Index file
        index: PathBuf,

        /// Words to look up
        queries: Vec<String>,

        /// Read additional queries from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,

        /// Maximum matches shown per query
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show the header, statistics and fingerprint of an index file
    Inspect {
        /// Index file
        index: PathBuf,
    },

    /// Compare an index with a linear scan over the same vocabulary
    Verify {
        /// Index file
        index: PathBuf,

        /// Queries to check, one per line
        #[arg(short, long)]
        file: PathBuf,
    },
}
