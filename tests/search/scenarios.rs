//! Known vocabularies with known answers.

use super::common::{
    assert_matches_brute_force, build, named, sorted_words, words, ALGORITHM_WORDS,
    COMPLETION_WORDS,
};
use fastss::{FastSsIndex, IndexConfig, Mode, Threshold};

#[test]
fn algorithm_in_sorted_vocabulary() {
    let mut index = build(Mode::WordMatchingFull, 2, sorted_words(ALGORITHM_WORDS));

    let found = index.find_closest_words(b"algorithm").unwrap();
    assert_eq!(found.len(), 4);
    assert_eq!(found.distances(), vec![0, 1, 1, 2]);
    assert!(found.in_vocabulary);

    let found = index.find_closest_words(b"unknown").unwrap();
    assert_eq!(found.len(), 0);
    assert!(!found.in_vocabulary);
}

#[test]
fn algorithm_in_unsorted_vocabulary() {
    let mut index = build(Mode::WordMatchingFull, 2, words(ALGORITHM_WORDS));
    let got = named(&mut index, "algorithm");
    assert_eq!(got[0], ("algorithm".to_string(), 0));
    let mut rest: Vec<_> = got[1..].to_vec();
    rest.sort();
    assert_eq!(
        rest,
        vec![
            ("agorithm".to_string(), 1),
            ("algorihm".to_string(), 1),
            ("xlgoorithm".to_string(), 2),
        ]
    );
}

#[test]
fn algorithm_in_every_mode() {
    for mode in [Mode::WordMatchingFull, Mode::WordMatchingTruncated] {
        let mut index = build(mode, 2, sorted_words(ALGORITHM_WORDS));
        assert_eq!(
            index.find_closest_words(b"algorithm").unwrap().distances(),
            vec![0, 1, 1, 2],
            "{mode:?}"
        );
        assert_eq!(index.find_closest_words(b"alorith").unwrap().len(), 2);
    }
}

#[test]
fn completion_of_algo() {
    let mut index = build(Mode::CompletionMatching, 2, words(COMPLETION_WORDS));
    let found = index.find_closest_words(b"algo").unwrap();
    assert!(!found.in_vocabulary);
    assert_eq!(found.distances(), vec![0, 0, 0, 1, 1, 1, 2, 2]);

    let mut got = named(&mut index, "algo");
    got.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    let exact: Vec<&str> = got.iter().filter(|(_, d)| *d == 0).map(|(w, _)| w.as_str()).collect();
    assert_eq!(exact, vec!["algorit", "algorith", "algorithm"]);
    let two: Vec<&str> = got.iter().filter(|(_, d)| *d == 2).map(|(w, _)| w.as_str()).collect();
    // "al" is a prefix of "allllgorithm", two deletions from "algo".
    assert_eq!(two, vec!["allllgorithm", "xxalgorithm"]);
}

#[test]
fn completion_of_a_full_word() {
    let mut index = build(Mode::CompletionMatching, 2, words(COMPLETION_WORDS));
    let found = index.find_closest_words(b"xxalgorithm").unwrap();
    assert!(found.in_vocabulary);
    assert_eq!(found.distances(), vec![0, 2, 2]);
}

#[test]
fn completion_suggestions_for_typed_prefixes() {
    let list = ["beza", "bezanson", "bezier", "bezos", "bzzz", "cat", "catalog"];
    let mut index = build(Mode::CompletionMatching, 1, sorted_words(&list));

    let got = named(&mut index, "bez");
    let names: Vec<&str> = got.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(names, vec!["beza", "bezanson", "bezier", "bezos", "bzzz"]);

    let mut got = named(&mut index, "catl");
    got.sort();
    assert_eq!(got, vec![("cat".to_string(), 1), ("catalog".to_string(), 1)]);

    for query in ["b", "be", "bez", "beza", "bezanzon", "cta", "zz"] {
        assert_matches_brute_force(&mut index, query.as_bytes());
    }
}

#[test]
fn truncated_mode_verifies_beyond_the_prefix() {
    let list = [
        "international",
        "internationale",
        "internet",
        "interval",
        "intern",
    ];
    let config = IndexConfig::new(Mode::WordMatchingTruncated, Threshold::Dynamic);
    let mut index = FastSsIndex::from_vocabulary(config, sorted_words(&list)).unwrap();
    let found = index.find_closest_words(b"internatinal").unwrap();
    // Length 12 gets threshold 3.
    let mut pairs: Vec<_> = found
        .matches
        .iter()
        .map(|m| (String::from_utf8(index.word(m.word_id).unwrap().to_vec()).unwrap(), m.distance))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![("international".to_string(), 1), ("internationale".to_string(), 2)]
    );
}
