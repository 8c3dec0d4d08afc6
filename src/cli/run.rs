// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;
use serde::Serialize;

use fastss::{
    file_fingerprint, FastSsIndex, FuzzyError, IndexConfig, LinearScan, QueryScratch, Result,
    Suggestion, Symbol, Threshold,
};

use super::display::*;
use super::ModeArg;

/// Non-empty lines of a text file, without line terminators.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn load_config(path: &Path) -> Result<IndexConfig> {
    let text = std::fs::read_to_string(path)?;
    #[cfg(feature = "serde_json")]
    {
        IndexConfig::from_json(&text)
    }
    #[cfg(not(feature = "serde_json"))]
    {
        let _ = text;
        Err(FuzzyError::InvalidConfig(
            "JSON configuration needs the serde_json feature".into(),
        ))
    }
}

pub struct BuildArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: Option<ModeArg>,
    pub threshold: Option<u32>,
    pub truncate: Option<usize>,
    pub config: Option<PathBuf>,
    pub no_reserve: bool,
    pub sort: bool,
}

pub fn run_build(args: BuildArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => IndexConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(k) = args.threshold {
        config.threshold = Threshold::fixed(k)?;
    }
    if let Some(len) = args.truncate {
        config.truncate_length = len;
    }
    config.validate()?;

    let mut lines = read_lines(&args.input)?;
    if args.sort {
        lines.sort_unstable();
        lines.dedup();
    }
    let vocabulary: Vec<Vec<char>> = lines.iter().map(|l| char::from_text(l)).collect();
    info!("read {} words from {}", vocabulary.len(), args.input.display());

    let start = Instant::now();
    let mut index = FastSsIndex::new(config)?.with_progress(use_colors());
    index.build(vocabulary, !args.no_reserve)?;
    let elapsed = start.elapsed();
    let fingerprint = index.save_to_file(&args.output)?;

    let stats = index.stats();
    section_top("BUILD");
    field("mode", &config.mode.to_string());
    field("threshold", &config.threshold.to_string());
    field("truncate length", &config.truncate_length.to_string());
    field("words", &stats.words.to_string());
    field("prefix ranges", &stats.prefix_ranges.to_string());
    field("deletion keys", &stats.entries.to_string());
    field("postings", &stats.postings.to_string());
    field("time", &format!("{:.2?}", elapsed));
    field("crc32", &format!("{fingerprint:08x}"));
    section_bot();
    Ok(())
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    in_vocabulary: bool,
    matches: Vec<Suggestion>,
}

fn suggestions(index: &FastSsIndex<char>, found: &fastss::ClosestWords, limit: usize) -> Vec<Suggestion> {
    found
        .matches
        .iter()
        .take(limit)
        .filter_map(|m| {
            index.word(m.word_id).map(|w| Suggestion {
                word: char::render(w),
                distance: m.distance,
            })
        })
        .collect()
}

/// Run every query, in parallel with one scratch state per worker when the
/// `parallel` feature is on.
fn search_all(
    index: &FastSsIndex<char>,
    queries: &[Vec<char>],
) -> Result<Vec<fastss::ClosestWords>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        queries
            .par_iter()
            .map_init(QueryScratch::default, |scratch, q| {
                index.find_closest_words_with(q, scratch)
            })
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        let mut scratch = QueryScratch::default();
        queries
            .iter()
            .map(|q| index.find_closest_words_with(q, &mut scratch))
            .collect()
    }
}

pub fn run_query(
    index_path: &Path,
    mut queries: Vec<String>,
    file: Option<&Path>,
    json: bool,
    limit: usize,
) -> Result<()> {
    if let Some(path) = file {
        queries.extend(read_lines(path)?);
    }
    let index = FastSsIndex::<char>::open(index_path)?;
    let symbols: Vec<Vec<char>> = queries.iter().map(|q| char::from_text(q)).collect();

    let start = Instant::now();
    let results = search_all(&index, &symbols)?;
    let elapsed = start.elapsed();

    for (query, found) in queries.iter().zip(&results) {
        let matches = suggestions(&index, found, limit);
        if json {
            #[cfg(feature = "serde_json")]
            {
                let report = QueryReport {
                    query,
                    in_vocabulary: found.in_vocabulary,
                    matches,
                };
                println!("{}", serde_json::to_string(&report)?);
            }
            #[cfg(not(feature = "serde_json"))]
            {
                let _ = matches;
                return Err(FuzzyError::InvalidConfig(
                    "--json needs the serde_json feature".into(),
                ));
            }
        } else {
            let marker = if found.in_vocabulary {
                themed(GREEN, &[], "in vocabulary")
            } else {
                themed(GRAY, &[DIM], "not in vocabulary")
            };
            println!("{}  {}  ({} matches)", themed(CYAN, &[BOLD], query), marker, found.len());
            for m in &matches {
                println!("    {:<24} {}", m.word, distance_badge(m.distance));
            }
        }
    }

    if !json && !queries.is_empty() {
        let per_query = elapsed.as_secs_f64() * 1e6 / queries.len() as f64;
        println!("{} queries, {} per query", queries.len(), timing_us(per_query));
    }
    Ok(())
}

pub fn run_inspect(index_path: &Path) -> Result<()> {
    let index = FastSsIndex::<char>::open(index_path)?;
    let header = index.header();
    let stats = index.stats();
    let size = std::fs::metadata(index_path)?.len();

    section_top("HEADER");
    field("mode", &format!("{} ({})", header.mode, header.mode.code()));
    field("threshold", &header.threshold.to_string());
    field("truncate length", &header.truncate_length.to_string());
    field("vocabulary", &header.vocabulary_size.to_string());
    field("deletion keys", &header.entry_count.to_string());
    field("prefix ranges", &header.prefix_range_count.to_string());
    section_mid("STATISTICS");
    field("postings", &stats.postings.to_string());
    field("single-posting keys", &stats.single_posting_entries.to_string());
    field("key symbols", &stats.key_symbols.to_string());
    field("vocabulary order", &format!("{:?}", index.order()));
    section_mid("FILE");
    field("size", &format_size(size));
    if let Some(crc) = index.fingerprint() {
        field("crc32", &format!("{crc:08x}"));
    }
    section_bot();
    Ok(())
}

/// Compare the index with a linear scan. `Ok(false)` if any query differs.
pub fn run_verify(index_path: &Path, queries_path: &Path) -> Result<bool> {
    let index = FastSsIndex::<char>::open(index_path)?;
    let scan = LinearScan::from_vocabulary(*index.config(), index.vocabulary().to_vec())?;
    let queries = read_lines(queries_path)?;
    let symbols: Vec<Vec<char>> = queries.iter().map(|q| char::from_text(q)).collect();

    let found = search_all(&index, &symbols)?;
    let (mut expected_total, mut found_total, mut common_total) = (0usize, 0usize, 0usize);
    let mut mismatched = Vec::new();

    for ((query, symbols), got) in queries.iter().zip(&symbols).zip(&found) {
        let want = scan.search(symbols)?;
        let want: BTreeSet<_> = want.matches.iter().map(|m| (m.word_id, m.distance)).collect();
        let got: BTreeSet<_> = got.matches.iter().map(|m| (m.word_id, m.distance)).collect();
        let common = want.intersection(&got).count();
        expected_total += want.len();
        found_total += got.len();
        common_total += common;
        if want != got {
            mismatched.push(query.as_str());
        }
    }

    section_top("VERIFY");
    field("queries", &queries.len().to_string());
    field("recall", &ratio(common_total, expected_total));
    field("precision", &ratio(common_total, found_total));
    field("mismatched queries", &mismatched.len().to_string());
    for query in mismatched.iter().take(10) {
        row(&themed(RED, &[], query));
    }
    section_bot();

    if let Some(crc) = index.fingerprint() {
        let on_disk = file_fingerprint(index_path)?;
        if on_disk != crc {
            return Err(FuzzyError::InvalidConfig(format!(
                "{} changed while verifying",
                index_path.display()
            )));
        }
    }
    Ok(mismatched.is_empty())
}
