//! Round trips, determinism and threshold monotonicity.

use std::collections::BTreeSet;

use super::common::ALL_MODES;
use fastss::{FastSsIndex, IndexConfig, Mode, Threshold};
use proptest::prelude::*;

fn vocabulary_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::string::string_regex("[a-e]{1,8}").unwrap(), 1..80).prop_map(
        |words| {
            let mut words: Vec<Vec<u8>> = words.into_iter().map(String::into_bytes).collect();
            words.sort();
            words.dedup();
            words
        },
    )
}

fn queries_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(
        prop::string::string_regex("[a-f]{1,9}").unwrap().prop_map(String::into_bytes),
        1..6,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn save_and_load_preserve_results(
        vocabulary in vocabulary_strategy(),
        queries in queries_strategy(),
        mode in prop::sample::select(ALL_MODES.to_vec()),
        k in 1u32..=3,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.fss");
        let config = IndexConfig::new(mode, Threshold::Fixed(k)).with_truncate_length(4);
        let mut built = FastSsIndex::from_vocabulary(config, vocabulary).unwrap();
        let crc = built.save_to_file(&path).unwrap();

        let mut loaded = FastSsIndex::<u8>::open(&path).unwrap();
        prop_assert_eq!(loaded.fingerprint(), Some(crc));
        prop_assert_eq!(fastss::file_fingerprint(&path).unwrap(), crc);
        prop_assert_eq!(loaded.config(), built.config());
        prop_assert_eq!(loaded.stats(), built.stats());
        for query in &queries {
            prop_assert_eq!(
                loaded.find_closest_words(query).unwrap(),
                built.find_closest_words(query).unwrap()
            );
        }
    }

    #[test]
    fn building_twice_is_identical(
        vocabulary in vocabulary_strategy(),
        mode in prop::sample::select(ALL_MODES.to_vec()),
        reserve in any::<bool>(),
    ) {
        let config = IndexConfig::new(mode, Threshold::Dynamic).with_truncate_length(3);
        let mut index = FastSsIndex::new(config).unwrap();
        index.build(vocabulary.clone(), reserve).unwrap();
        let mut first = Vec::new();
        index.write_to(&mut first).unwrap();

        index.build(vocabulary, !reserve).unwrap();
        let mut second = Vec::new();
        index.write_to(&mut second).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn larger_thresholds_find_more(
        vocabulary in vocabulary_strategy(),
        queries in queries_strategy(),
        mode in prop::sample::select(ALL_MODES.to_vec()),
    ) {
        let mut previous: Vec<BTreeSet<(u32, u32)>> = vec![BTreeSet::new(); queries.len()];
        for k in 0u32..=3 {
            let config = IndexConfig::new(mode, Threshold::Fixed(k)).with_truncate_length(5);
            let mut index = FastSsIndex::from_vocabulary(config, vocabulary.clone()).unwrap();
            for (query, before) in queries.iter().zip(previous.iter_mut()) {
                let found: BTreeSet<(u32, u32)> = index
                    .find_closest_words(query)
                    .unwrap()
                    .matches
                    .iter()
                    .map(|m| (m.word_id, m.distance))
                    .collect();
                prop_assert!(before.is_subset(&found), "k={} lost matches for {:?}", k, query);
                prop_assert!(found.iter().all(|&(_, d)| d <= k));
                *before = found;
            }
        }
    }
}

#[test]
fn loading_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.fss");
    let small = FastSsIndex::from_vocabulary(
        IndexConfig::new(Mode::WordMatchingFull, Threshold::Fixed(1)),
        vec![b"one".to_vec()],
    )
    .unwrap();
    small.save_to_file(&path).unwrap();

    let mut index = FastSsIndex::from_vocabulary(
        IndexConfig::new(Mode::CompletionMatching, Threshold::Fixed(3)),
        vec![b"alpha".to_vec(), b"beta".to_vec()],
    )
    .unwrap();
    let words = index.load_from_file(&path).unwrap();
    assert_eq!(words, &[b"one".to_vec()]);
    assert_eq!(index.mode(), Mode::WordMatchingFull);
    assert_eq!(index.threshold(), Threshold::Fixed(1));
    assert!(index.find_closest_words(b"beta").unwrap().is_empty());
    assert_eq!(index.find_closest_words(b"ones").unwrap().distances(), vec![1]);
}
