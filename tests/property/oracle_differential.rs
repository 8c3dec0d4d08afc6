//! Differential tests: index vs linear scan.

use super::common::{assert_matches_brute_force, brute_force, canonical, ALL_MODES};
use fastss::{DistanceEngine, FastSsIndex, IndexConfig, Mode, Threshold};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Short words over a small alphabet, so neighborhoods collide often.
fn word_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abcd".to_vec()), 0..10)
}

fn vocabulary_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(word_strategy(), 1..200).prop_map(|mut words| {
        words.sort();
        words.dedup();
        words
    })
}

fn query_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abcde".to_vec()), 1..12)
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop::sample::select(ALL_MODES.to_vec())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn fixed_threshold_matches_brute_force(
        vocabulary in vocabulary_strategy(),
        queries in prop::collection::vec(query_strategy(), 1..8),
        mode in mode_strategy(),
        k in 1u32..=3,
        truncate in 1usize..=6,
    ) {
        let config = IndexConfig::new(mode, Threshold::Fixed(k)).with_truncate_length(truncate);
        let mut index = FastSsIndex::from_vocabulary(config, vocabulary).unwrap();
        for query in &queries {
            assert_matches_brute_force(&mut index, query);
        }
    }

    #[test]
    fn dynamic_threshold_matches_brute_force(
        vocabulary in vocabulary_strategy(),
        queries in prop::collection::vec(query_strategy(), 1..8),
        mode in mode_strategy(),
        truncate in 2usize..=8,
    ) {
        let config = IndexConfig::new(mode, Threshold::Dynamic).with_truncate_length(truncate);
        let mut index = FastSsIndex::from_vocabulary(config, vocabulary).unwrap();
        for query in &queries {
            assert_matches_brute_force(&mut index, query);
        }
    }

    #[test]
    fn descending_completion_vocabulary_matches_brute_force(
        vocabulary in vocabulary_strategy(),
        query in query_strategy(),
        k in 1u32..=3,
    ) {
        let mut vocabulary = vocabulary;
        vocabulary.reverse();
        let config = IndexConfig::new(Mode::CompletionMatching, Threshold::Fixed(k))
            .with_truncate_length(4);
        let mut index = FastSsIndex::from_vocabulary(config, vocabulary).unwrap();
        assert_matches_brute_force(&mut index, &query);
    }

    #[test]
    fn unsorted_vocabulary_stays_exact(
        vocabulary in prop::collection::vec(word_strategy(), 1..60),
        query in query_strategy(),
        k in 1u32..=2,
    ) {
        let config = IndexConfig::new(Mode::WordMatchingFull, Threshold::Fixed(k));
        let mut index = FastSsIndex::from_vocabulary(config, vocabulary).unwrap();
        assert_matches_brute_force(&mut index, &query);
    }

    #[test]
    fn engines_agree(
        vocabulary in vocabulary_strategy(),
        query in query_strategy(),
        k in 0u32..=3,
        truncated in any::<bool>(),
    ) {
        let mode = if truncated { Mode::WordMatchingTruncated } else { Mode::WordMatchingFull };
        let base = IndexConfig::new(mode, Threshold::Fixed(k)).with_truncate_length(3);
        let mut dp = FastSsIndex::from_vocabulary(
            base.with_distance_engine(DistanceEngine::DynamicProgramming),
            vocabulary.clone(),
        ).unwrap();
        let mut bits = FastSsIndex::from_vocabulary(
            base.with_distance_engine(DistanceEngine::BitParallel),
            vocabulary,
        ).unwrap();
        prop_assert_eq!(
            dp.find_closest_words(&query).unwrap(),
            bits.find_closest_words(&query).unwrap()
        );
    }

    #[test]
    fn unicode_words_match_brute_force(
        words in prop::collection::vec(
            prop::collection::vec(prop::sample::select(vec!['a', 'ä', 'ö', 'o', 'ß']), 1..7),
            1..50,
        ),
        query in prop::collection::vec(prop::sample::select(vec!['a', 'ä', 'o', 'ß', 'x']), 1..7),
        mode in mode_strategy(),
    ) {
        let mut words = words;
        words.sort();
        words.dedup();
        let config = IndexConfig::new(mode, Threshold::Fixed(2)).with_truncate_length(3);
        let mut index = FastSsIndex::<char>::from_vocabulary(config, words.clone()).unwrap();
        let got = index.find_closest_words(&query).unwrap();

        let scan = fastss::LinearScan::from_vocabulary(config, words).unwrap();
        let want = scan.search(&query).unwrap();
        prop_assert_eq!(canonical(&got), canonical(&want));
    }
}

#[test]
fn long_queries_are_clamped_consistently() {
    let vocabulary: Vec<Vec<u8>> = vec![vec![b'a'; 44], vec![b'a'; 45], vec![b'a'; 46]];
    let query = vec![b'a'; 60];
    for mode in [Mode::WordMatchingTruncated, Mode::CompletionMatching] {
        let config = IndexConfig::new(mode, Threshold::Fixed(1));
        let mut index = FastSsIndex::from_vocabulary(config, vocabulary.clone()).unwrap();
        let got = index.find_closest_words(&query).unwrap();
        let want = brute_force(config, &vocabulary, &query);
        assert_eq!(canonical(&got), canonical(&want), "{mode:?}");
        assert!(!got.is_empty());
    }
}
