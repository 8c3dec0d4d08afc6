//! Boundary inputs.

use super::common::{assert_matches_brute_force, build, named, sorted_words};
use fastss::{
    DistanceEngine, FastSsIndex, FuzzyError, IndexConfig, Mode, Threshold, MAX_WORD_LEN,
};

#[test]
fn empty_query_returns_nothing() {
    for mode in [Mode::WordMatchingFull, Mode::CompletionMatching] {
        let mut index = build(mode, 3, sorted_words(&["a", "ab"]));
        let found = index.find_closest_words(b"").unwrap();
        assert!(found.is_empty());
        assert!(!found.in_vocabulary);
    }
}

#[test]
fn empty_word_in_vocabulary() {
    let mut index = build(Mode::WordMatchingFull, 2, sorted_words(&["", "a", "abc"]));
    let mut got = named(&mut index, "ab");
    got.sort();
    assert_eq!(
        got,
        vec![
            ("".to_string(), 2),
            ("a".to_string(), 1),
            ("abc".to_string(), 1)
        ]
    );
    assert!(index.find_closest_words(b"").unwrap().in_vocabulary);
}

#[test]
fn empty_vocabulary_answers_nothing() {
    let mut index = build(Mode::CompletionMatching, 2, Vec::new());
    assert!(index.is_empty());
    assert!(index.find_closest_words(b"anything").unwrap().is_empty());
}

#[test]
fn threshold_zero_is_exact_lookup() {
    let mut index = build(Mode::WordMatchingFull, 0, sorted_words(&["cat", "cart", "car"]));
    assert_eq!(named(&mut index, "car"), vec![("car".to_string(), 0)]);
    assert!(named(&mut index, "ca").is_empty());

    let mut index = build(Mode::CompletionMatching, 0, sorted_words(&["cat", "cart", "car"]));
    let mut got = named(&mut index, "ca");
    got.sort();
    assert_eq!(
        got,
        vec![
            ("car".to_string(), 0),
            ("cart".to_string(), 0),
            ("cat".to_string(), 0)
        ]
    );
}

#[test]
fn over_long_queries_follow_the_mode() {
    let long = vec![b'q'; MAX_WORD_LEN + 1];

    let mut full = build(Mode::WordMatchingFull, 1, sorted_words(&["q"]));
    let err = full.find_closest_words(&long).unwrap_err();
    assert!(matches!(err, FuzzyError::QueryTooLong { len: 46, max: 45 }));
    assert!(full.find_closest_words(&long[..MAX_WORD_LEN]).is_ok());

    let word = vec![b'q'; MAX_WORD_LEN];
    let mut truncated = build(Mode::WordMatchingTruncated, 1, vec![word]);
    let found = truncated.find_closest_words(&long).unwrap();
    assert_eq!(found.distances(), vec![0]);
    assert!(found.in_vocabulary);
}

#[test]
fn duplicate_words_are_all_reported() {
    let vocabulary = vec![b"same".to_vec(), b"same".to_vec(), b"sane".to_vec()];
    let mut index = build(Mode::WordMatchingFull, 1, vocabulary);
    let found = index.find_closest_words(b"same").unwrap();
    assert_eq!(found.word_ids(), vec![0, 1, 2]);
    assert_eq!(found.distances(), vec![0, 0, 1]);
}

#[test]
fn runs_longer_than_a_range_lose_no_words() {
    let vocabulary: Vec<Vec<u8>> = (0..1500).map(|i| format!("pre{i:04}").into_bytes()).collect();
    for mode in [Mode::WordMatchingTruncated, Mode::CompletionMatching] {
        let config = IndexConfig::new(mode, Threshold::Fixed(1)).with_truncate_length(3);
        let mut index = FastSsIndex::from_vocabulary(config, vocabulary.clone()).unwrap();
        assert!(index.prefix_ranges().iter().all(|r| r.word_count() <= 512));
        let found = index.find_closest_words(b"pre1499").unwrap();
        assert_eq!(found.matches[0].word_id, 1499);
        assert_eq!(found.matches[0].distance, 0);
        assert_matches_brute_force(&mut index, b"pre1499");
        assert_matches_brute_force(&mut index, b"pre0000");
        assert_matches_brute_force(&mut index, b"pre14999");
        assert_matches_brute_force(&mut index, b"prx0512");
    }
}

#[test]
fn truncate_length_of_one() {
    let list = ["apple", "apply", "banana", "band", "bandana"];
    for mode in [Mode::WordMatchingTruncated, Mode::CompletionMatching] {
        let config = IndexConfig::new(mode, Threshold::Fixed(2)).with_truncate_length(1);
        let mut index = FastSsIndex::from_vocabulary(config, sorted_words(&list)).unwrap();
        for query in ["aple", "bnd", "xandana", "b", "zz"] {
            assert_matches_brute_force(&mut index, query.as_bytes());
        }
    }
}

#[test]
fn invalid_configurations_are_rejected() {
    let err = Threshold::fixed(4).unwrap_err();
    assert!(matches!(err, FuzzyError::UnsupportedThreshold { threshold: 4, max: 3 }));

    let err = FastSsIndex::<u8>::new(
        IndexConfig::new(Mode::WordMatchingFull, Threshold::Fixed(7)),
    )
    .unwrap_err();
    assert!(matches!(err, FuzzyError::UnsupportedThreshold { .. }));

    let err = FastSsIndex::<u8>::new(
        IndexConfig::new(Mode::CompletionMatching, Threshold::Dynamic)
            .with_distance_engine(DistanceEngine::BitParallel),
    )
    .unwrap_err();
    assert!(matches!(err, FuzzyError::UnsupportedCombination { .. }));

    let err = FastSsIndex::<u8>::new(IndexConfig::default().with_truncate_length(0)).unwrap_err();
    assert!(matches!(err, FuzzyError::InvalidConfig(_)));

    assert!(matches!(Mode::try_from(4), Err(FuzzyError::UnknownMode(4))));
}

#[test]
fn descending_vocabulary_membership() {
    let mut vocabulary = sorted_words(&["alpha", "beta", "gamma"]);
    vocabulary.reverse();
    let mut index = build(Mode::CompletionMatching, 1, vocabulary);
    assert_eq!(index.order(), fastss::VocabularyOrder::Descending);
    assert!(index.find_closest_words(b"beta").unwrap().in_vocabulary);
    assert!(!index.find_closest_words(b"bet").unwrap().in_vocabulary);
}
