//! Build and query counters.

use super::common::{build, sorted_words};
use fastss::index::neighborhood_size;
use fastss::{BuildPhase, FastSsIndex, IndexConfig, Mode, QueryScratch, Threshold};

#[test]
fn probes_cover_the_query_neighborhood() {
    let mut index = build(Mode::WordMatchingFull, 2, sorted_words(&["kitten", "sitting", "mitten"]));
    index.find_closest_words(b"kitten").unwrap();
    assert_eq!(index.last_query_stats().probes, neighborhood_size(6, 2));
}

#[test]
fn every_candidate_is_accounted_for() {
    let list = [
        "algorithm", "algorithms", "allegory", "alright", "altogether", "logarithm",
        "rhythm", "algebra", "algae", "alga",
    ];
    for mode in [Mode::WordMatchingFull, Mode::WordMatchingTruncated, Mode::CompletionMatching] {
        let config = IndexConfig::new(mode, Threshold::Fixed(2)).with_truncate_length(3);
        let mut index = FastSsIndex::from_vocabulary(config, sorted_words(&list)).unwrap();
        for query in ["algoritm", "alg", "rythm", "algebras"] {
            let found = index.find_closest_words(query.as_bytes()).unwrap();
            let s = index.last_query_stats();
            assert_eq!(
                s.candidates,
                s.length_filtered
                    + s.letter_filtered
                    + s.shortcut_hits
                    + s.short_query_checks
                    + s.distance_computations,
                "{mode:?} {query}: {s:?}"
            );
            assert!(found.len() <= s.candidates);
            assert!(s.candidates <= index.len());
        }
    }
}

#[test]
fn letter_filter_only_runs_past_the_truncation() {
    let list = ["abcdefghij", "zyxwvutsrq", "abcdefghiz"];
    let config = IndexConfig::new(Mode::WordMatchingTruncated, Threshold::Fixed(1))
        .with_truncate_length(2);
    let mut index = FastSsIndex::from_vocabulary(config, sorted_words(&list)).unwrap();

    index.find_closest_words(b"abcdefghij").unwrap();
    assert!(index.last_query_stats().letter_filtered == 0);

    // Shares the two-symbol prefix but little else.
    index.find_closest_words(b"abqqqqqqqq").unwrap();
    assert!(index.last_query_stats().letter_filtered > 0);
}

#[test]
fn explicit_scratch_keeps_the_index_shared() {
    let index = build(Mode::WordMatchingTruncated, 1, sorted_words(&["north", "south", "mouth"]));
    let mut a = QueryScratch::new();
    let mut b = QueryScratch::new();
    let from_a = index.find_closest_words_with(b"souht", &mut a).unwrap();
    let from_b = index.find_closest_words_with(b"nort", &mut b).unwrap();
    assert_eq!(from_a.len(), 0);
    assert_eq!(from_b.distances(), vec![1]);
    assert_eq!(a.stats().probes, neighborhood_size(5, 1));
    assert_eq!(b.stats().probes, neighborhood_size(4, 1));
}

#[test]
fn build_statistics_describe_the_map() {
    let index = build(Mode::WordMatchingFull, 1, sorted_words(&["ab", "ac"]));
    assert_eq!(index.phase(), BuildPhase::Ready);
    let stats = index.stats();
    // "ab" → ab a b, "ac" → ac a c: five distinct keys, "a" shared.
    assert_eq!(stats.words, 2);
    assert_eq!(stats.prefix_ranges, 2);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.postings, 6);
    assert_eq!(stats.single_posting_entries, 4);
    assert_eq!(stats.key_symbols, 2 + 1 + 1 + 2 + 1);
    assert_eq!(index.postings(b"a"), Some(&[0u32, 1][..]));
}
