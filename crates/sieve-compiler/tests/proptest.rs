//! Property-based tests for synthesis and diagnostics using proptest.

use proptest::prelude::*;
use sieve_compiler::{Filter, Paging, Timestamp};

// ============================================================================
// Test fixtures
// ============================================================================

#[derive(Debug, Clone, sieve_macros::Model)]
struct Row {
    a: String,
    b: String,
    c: String,
    tags: Vec<String>,
    due: Timestamp,
}

/// `(a AND b) OR c`, folded left.
#[derive(Debug, Clone, Default, sieve_macros::Filter)]
#[filter(model = Row)]
struct FoldFilter {
    #[filter]
    a: Option<String>,
    #[filter]
    b: Option<String>,
    #[filter(logic = "or")]
    c: Option<String>,
}

#[derive(Debug, Clone, Default, sieve_macros::Filter)]
#[filter(model = Row)]
struct TagFilter {
    #[filter]
    tags: Option<Vec<String>>,

    #[filter(paging)]
    paging: Paging,

    #[allow(dead_code)]
    note: String,
}

#[derive(Debug, Clone, Default, sieve_macros::Filter)]
#[filter(model = Row)]
struct AfterFilter {
    #[filter(target = "due", op = "lt")]
    after: Option<Timestamp>,
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        "[xy]",
        "[xy]",
        "[xy]",
        prop::collection::vec("[a-d]", 0..4),
        -1_000i64..1_000,
    )
        .prop_map(|(a, b, c, tags, due)| Row {
            a,
            b,
            c,
            tags,
            due: Timestamp::from_millis(due),
        })
}

fn list_and_shuffle() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::vec("[a-z]{1,4}", 0..8)
        .prop_flat_map(|list| (Just(list.clone()), Just(list).prop_shuffle()))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// List fields hash as multisets.
    #[test]
    fn fingerprint_ignores_list_order((list, shuffled) in list_and_shuffle()) {
        let a = TagFilter { tags: Some(list), ..Default::default() };
        let b = TagFilter { tags: Some(shuffled), ..Default::default() };

        prop_assert_eq!(
            a.compile().unwrap().fingerprint(),
            b.compile().unwrap().fingerprint()
        );
    }

    /// Fields without filter metadata never take part.
    #[test]
    fn fingerprint_ignores_unannotated_fields(
        tags in prop::collection::vec("[a-z]{1,4}", 0..4),
        note in ".*",
    ) {
        let plain = TagFilter { tags: Some(tags.clone()), ..Default::default() };
        let noted = TagFilter { tags: Some(tags), note, ..Default::default() };

        prop_assert_eq!(
            plain.compile().unwrap().fingerprint(),
            noted.compile().unwrap().fingerprint()
        );
    }

    /// Paging takes part in the fingerprint.
    #[test]
    fn fingerprint_tracks_paging(
        first in (-1i32..100, -1i32..100),
        second in (-1i32..100, -1i32..100),
    ) {
        prop_assume!(first != second);

        let a = TagFilter { paging: Paging::new(first.0, first.1), ..Default::default() };
        let b = TagFilter { paging: Paging::new(second.0, second.1), ..Default::default() };

        prop_assert_ne!(
            a.compile().unwrap().fingerprint(),
            b.compile().unwrap().fingerprint()
        );
    }

    /// Sub-predicates fold strictly left in declaration order.
    #[test]
    fn logic_folds_left(
        a in "[xy]",
        b in "[xy]",
        c in "[xy]",
        rows in prop::collection::vec(row_strategy(), 0..20),
    ) {
        let filter = FoldFilter { a: Some(a.clone()), b: Some(b.clone()), c: Some(c.clone()) };
        let predicate = filter.compile().unwrap().synthesize_default().unwrap().unwrap();

        for row in &rows {
            let expected = (row.a == a && row.b == b) || row.c == c;
            prop_assert_eq!(predicate.matches(row), expected);
        }
    }

    /// Presence probes agree with the emptiness policy.
    #[test]
    fn presence_probes(
        a in proptest::option::of("[xy]?"),
        b in proptest::option::of("[xy]?"),
        c in proptest::option::of("[xy]?"),
    ) {
        let present: Vec<bool> = [&a, &b, &c]
            .iter()
            .map(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
            .collect();
        let compiler = FoldFilter { a, b, c }.compile().unwrap();

        prop_assert_eq!(compiler.has_any(), present.iter().any(|p| *p));
        prop_assert_eq!(compiler.has_all(), present.iter().all(|p| *p));

        // Nothing to synthesize exactly when nothing is present.
        let synthesized = compiler.synthesize_default().unwrap();
        prop_assert_eq!(synthesized.is_some(), compiler.has_any());
    }

    /// Date operations read with the filter value on the left.
    #[test]
    fn date_op_reads_filter_first(filter_ms in -1_000i64..1_000, row in row_strategy()) {
        let filter = AfterFilter { after: Some(Timestamp::from_millis(filter_ms)) };
        let predicate = filter.compile().unwrap().synthesize_default().unwrap().unwrap();

        prop_assert_eq!(predicate.matches(&row), i128::from(filter_ms) < row.due.as_millis());
    }

    /// Filtering never returns more items than the input, and counting agrees
    /// with filtering.
    #[test]
    fn filter_never_grows_collection(
        filter_ms in -1_000i64..1_000,
        rows in prop::collection::vec(row_strategy(), 0..50),
    ) {
        let filter = AfterFilter { after: Some(Timestamp::from_millis(filter_ms)) };
        let predicate = filter.compile().unwrap().synthesize_default().unwrap().unwrap();

        let filtered = predicate.filter(&rows);
        prop_assert!(filtered.len() <= rows.len());
        prop_assert_eq!(filtered.len(), predicate.count(&rows));
        prop_assert_eq!(predicate.any(&rows), !filtered.is_empty());
    }

    /// Overlap matches exactly when the lists share an element.
    #[test]
    fn overlap_matches_shared_elements(
        wanted in prop::collection::vec("[a-d]", 1..4),
        row in row_strategy(),
    ) {
        let filter = TagFilter { tags: Some(wanted.clone()), ..Default::default() };
        let predicate = filter.compile().unwrap().synthesize_default().unwrap().unwrap();

        let expected = row.tags.iter().any(|t| wanted.contains(t));
        prop_assert_eq!(predicate.matches(&row), expected);
    }
}
