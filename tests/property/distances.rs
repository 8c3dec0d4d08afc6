//! Distance kernels against each other and against strsim.

use fastss::fuzzy::{
    bit_parallel_distance, bounded_edit_distance, edit_distance, extension_distance,
    extension_distance_with_position, short_query_distance, EditMatrix, IncrementalExtension,
    MyersPattern, MAX_PATTERN_LEN,
};
use fastss::FuzzyError;
use proptest::prelude::*;

fn text(max: usize) -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[abcx]{{0,{max}}}")).unwrap()
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

proptest! {
    #[test]
    fn levenshtein_matches_strsim(a in text(12), b in text(12)) {
        let expected = strsim::levenshtein(&a, &b) as u32;
        prop_assert_eq!(edit_distance(a.as_bytes(), b.as_bytes()), expected);
    }

    #[test]
    fn bounded_distance_is_exact_below_cap(a in text(12), b in text(12), k in 0u32..=4) {
        let exact = strsim::levenshtein(&a, &b) as u32;
        prop_assert_eq!(bounded_edit_distance(a.as_bytes(), b.as_bytes(), k), exact.min(k + 1));
    }

    #[test]
    fn myers_matches_dp(a in text(20), b in text(20)) {
        let exact = edit_distance(a.as_bytes(), b.as_bytes());
        prop_assert_eq!(bit_parallel_distance(a.as_bytes(), b.as_bytes(), false).unwrap(), exact);
    }

    #[test]
    fn myers_with_transpositions_matches_osa(a in text(16), b in text(16)) {
        let expected = strsim::osa_distance(&a, &b) as u32;
        prop_assert_eq!(
            bit_parallel_distance(&chars(&a), &chars(&b), true).unwrap(),
            expected
        );
    }

    #[test]
    fn compiled_pattern_is_reusable(p in text(10), texts in prop::collection::vec(text(10), 1..6)) {
        let pattern = MyersPattern::new(p.as_bytes()).unwrap();
        for t in &texts {
            prop_assert_eq!(
                pattern.distance(t.as_bytes(), false),
                edit_distance(p.as_bytes(), t.as_bytes())
            );
        }
    }

    #[test]
    fn extension_is_minimum_over_prefixes(q in text(8), w in text(10), k in 0u32..=3) {
        let (q, w) = (q.as_bytes(), w.as_bytes());
        let exact = (0..=w.len()).map(|i| edit_distance(q, &w[..i])).min().unwrap_or(0);
        let hit = extension_distance_with_position(q, w, k);
        prop_assert_eq!(hit.distance, exact.min(k + 1));
        if exact <= k {
            prop_assert_eq!(edit_distance(q, &w[..hit.position]), exact);
        }
    }

    #[test]
    fn incremental_extension_tracks_one_shot(q in text(9), w in text(12), k in 0u32..=3) {
        let (q, w) = (q.as_bytes(), w.as_bytes());
        let mut typing = IncrementalExtension::new(w, k);
        for (i, &symbol) in q.iter().enumerate() {
            let got = typing.push(symbol);
            prop_assert_eq!(got, extension_distance(&q[..=i], w, k));
        }
        prop_assert_eq!(typing.query_len(), q.len());
    }

    #[test]
    fn matrix_reuse_is_invisible(
        q in text(8),
        words in prop::collection::vec(text(10), 1..10),
        k in 0u32..=3,
    ) {
        let mut words: Vec<Vec<u8>> = words.into_iter().map(String::into_bytes).collect();
        words.sort();
        let q = q.as_bytes();
        let mut edit = EditMatrix::new();
        let mut ext = EditMatrix::new();
        edit.reset(q, k);
        ext.reset(q, k);

        let mut prev: &[u8] = &[];
        for w in &words {
            let shared = fastss::fuzzy::common_prefix_len(prev, w);
            prop_assert_eq!(edit.edit_distance(w, shared), bounded_edit_distance(q, w, k));
            prop_assert_eq!(ext.extension(w, shared).distance, extension_distance(q, w, k));
            prev = w;
        }
    }

    #[test]
    fn short_queries_agree_with_general_kernels(q in text(3), w in text(8), k in 0u32..=2) {
        let (q, w) = (q.as_bytes(), w.as_bytes());
        prop_assert_eq!(short_query_distance(q, w, k, false), bounded_edit_distance(q, w, k));
        prop_assert_eq!(short_query_distance(q, w, k, true), extension_distance(q, w, k));
    }
}

#[test]
fn examples_from_the_word_lists() {
    let d = |a: &str, b: &str| edit_distance(a.as_bytes(), b.as_bytes());
    assert_eq!(d("algorithm", "alogrithm"), 2);
    assert_eq!(d("algorthm", "algorithm"), 1);
    assert_eq!(d("algoritthm", "algorithm"), 1);
    assert_eq!(d("a1l2g3o4r5i6t7h8m", "algorithm"), 8);
    assert_eq!(edit_distance(&chars("algorith"), &chars("algörithm")), 2);
    assert_eq!(edit_distance(&chars("gluck"), &chars("glück")), 1);

    let e = |a: &str, b: &str| extension_distance(&chars(a), &chars(b), 3);
    assert_eq!(e("alg", "algorithm"), 0);
    assert_eq!(e("also", "algorithm"), 1);
    assert_eq!(e("lgo", "algorithm"), 1);
    assert_eq!(e("glüc", "glück"), 0);
    assert_eq!(e("algörit", "algörithm"), 0);
}

#[test]
fn patterns_longer_than_a_word_are_rejected() {
    let long = vec![b'a'; MAX_PATTERN_LEN + 1];
    let err = bit_parallel_distance(&long, b"a", false).unwrap_err();
    assert!(matches!(err, FuzzyError::PatternTooLong { .. }));
    assert!(bit_parallel_distance(&long[..MAX_PATTERN_LEN], b"a", false).is_ok());
}
