//! Property-based tests for the diff engine.
//!
//! Ensures the comparison invariants hold across randomly generated
//! requirement sets: self-comparison identity, add/delete symmetry, and
//! summary count consistency.

use proptest::prelude::*;
use reqif_tools::{compare, CanonicalValue, Requirement};

fn requirement_strategy() -> impl Strategy<Value = Requirement> {
    (
        "REQ-[0-9]{1,3}",
        "[A-Za-z ]{0,30}",
        "[A-Za-z ]{0,60}",
        prop::collection::vec(("[A-Z][a-z]{1,8}", "[A-Za-z0-9 ]{0,20}"), 0..4),
    )
        .prop_map(|(id, title, description, attrs)| {
            let mut req = Requirement::new(id, 0);
            req.title = title;
            req.description = description;
            for (key, value) in attrs {
                req.attributes.insert(key, CanonicalValue::from(value));
            }
            req.seal();
            req
        })
}

fn requirement_set() -> impl Strategy<Value = Vec<Requirement>> {
    prop::collection::vec(requirement_strategy(), 0..12).prop_map(|mut reqs| {
        for (order, req) in reqs.iter_mut().enumerate() {
            req.source_order = order;
            req.seal();
        }
        reqs
    })
}

proptest! {
    #[test]
    fn self_comparison_is_identical(set in requirement_set()) {
        let result = compare(&set, &set);
        prop_assert!(result.is_identical());
        prop_assert!(result.added.is_empty());
        prop_assert!(result.deleted.is_empty());
        prop_assert_eq!(result.summary.field_change_count, 0);
    }

    #[test]
    fn added_and_deleted_swap_on_reversal(
        baseline in requirement_set(),
        revised in requirement_set(),
    ) {
        let forward = compare(&baseline, &revised);
        let backward = compare(&revised, &baseline);

        let forward_added: Vec<_> = forward.added.iter().map(|r| r.id.clone()).collect();
        let backward_deleted: Vec<_> = backward.deleted.iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(forward_added, backward_deleted);
        prop_assert_eq!(forward.summary.modified, backward.summary.modified);
        prop_assert_eq!(forward.summary.unchanged, backward.summary.unchanged);
    }

    #[test]
    fn summary_counts_match_category_lengths(
        baseline in requirement_set(),
        revised in requirement_set(),
    ) {
        let result = compare(&baseline, &revised);

        prop_assert_eq!(result.summary.added, result.added.len());
        prop_assert_eq!(result.summary.deleted, result.deleted.len());
        prop_assert_eq!(result.summary.modified, result.modified.len());
        prop_assert_eq!(result.summary.unchanged, result.unchanged.len());
        prop_assert_eq!(
            result.summary.total_compared,
            result.added.len() + result.deleted.len() + result.modified.len() + result.unchanged.len()
        );

        let field_changes: usize = result.modified.iter().map(|m| m.changes.len()).sum();
        prop_assert_eq!(result.summary.field_change_count, field_changes);
    }

    #[test]
    fn comparison_is_deterministic(
        baseline in requirement_set(),
        revised in requirement_set(),
    ) {
        let first = compare(&baseline, &revised);
        let second = compare(&baseline, &revised);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_modified_entry_has_at_least_one_change(
        baseline in requirement_set(),
        revised in requirement_set(),
    ) {
        let result = compare(&baseline, &revised);
        for modified in &result.modified {
            prop_assert!(!modified.changes.is_empty());
        }
    }
}
