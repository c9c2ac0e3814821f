//! Property tests for the diff engine and natural ordering.

use dub_core::{compute_diff, join_segments, natural_compare, DiffKind, DiffSegment};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use std::cmp::Ordering;

fn file_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_. -]{0,16}"
}

fn unicode_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), 0..16).prop_map(|chars| chars.into_iter().collect())
}

fn equal_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind == DiffKind::Equal)
        .map(|s| s.text.as_str())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn diff_sides_reconstruct_inputs(old in unicode_name(), new in unicode_name()) {
        let (old_segments, new_segments) = compute_diff(&old, &new);
        prop_assert_eq!(join_segments(&old_segments), old);
        prop_assert_eq!(join_segments(&new_segments), new);
    }

    #[test]
    fn diff_sides_use_their_own_kinds(old in file_name(), new in file_name()) {
        let (old_segments, new_segments) = compute_diff(&old, &new);
        prop_assert!(old_segments.iter().all(|s| s.kind != DiffKind::Insert));
        prop_assert!(new_segments.iter().all(|s| s.kind != DiffKind::Delete));
    }

    #[test]
    fn diff_equal_runs_match_on_both_sides(old in file_name(), new in file_name()) {
        let (old_segments, new_segments) = compute_diff(&old, &new);
        prop_assert_eq!(equal_text(&old_segments), equal_text(&new_segments));
    }

    #[test]
    fn diff_segments_are_merged_and_non_empty(old in file_name(), new in file_name()) {
        let (old_segments, new_segments) = compute_diff(&old, &new);
        for segments in [&old_segments, &new_segments] {
            prop_assert!(segments.iter().all(|s| !s.text.is_empty()));
            prop_assert!(segments.windows(2).all(|w| w[0].kind != w[1].kind));
        }
    }

    #[test]
    fn diff_of_identical_names_is_all_equal(name in file_name()) {
        let (old_segments, new_segments) = compute_diff(&name, &name);
        prop_assert!(old_segments.iter().all(|s| s.kind == DiffKind::Equal));
        prop_assert_eq!(old_segments, new_segments);
    }

    #[test]
    fn natural_compare_is_antisymmetric(a in file_name(), b in file_name()) {
        prop_assert_eq!(natural_compare(&a, &b), natural_compare(&b, &a).reverse());
    }

    #[test]
    fn natural_compare_ignores_ascii_case(a in file_name()) {
        prop_assert_eq!(natural_compare(&a, &a.to_uppercase()), Ordering::Equal);
    }

    #[test]
    fn natural_compare_orders_numbers_by_value(n in 0u64..100_000, m in 0u64..100_000) {
        let a = format!("file_{n}.txt");
        let b = format!("file_{m}.txt");
        prop_assert_eq!(natural_compare(&a, &b), n.cmp(&m));
    }

    #[test]
    fn natural_compare_handles_huge_digit_runs(digits in "[1-9][0-9]{30,40}") {
        let longer = format!("{digits}0");
        prop_assert_eq!(natural_compare(&digits, &longer), Ordering::Less);
    }
}
