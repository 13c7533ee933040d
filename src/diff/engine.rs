//! Structural comparison engine.
//!
//! Matching is purely id-based. The engine is a pure function of its two
//! inputs: no file access, no similarity scoring, no move detection.

use indexmap::IndexMap;
use tracing::debug;

use super::result::{
    DiffResult, DiffSide, DuplicateIdWarning, FieldChange, ModifiedRequirement,
};
use crate::model::Requirement;

/// Compares two requirement sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine;

impl DiffEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compare a baseline set against a revised set.
    ///
    /// Output ordering is deterministic: added follows revised source
    /// order, everything else follows baseline source order.
    #[must_use]
    pub fn compare(&self, baseline: &[Requirement], revised: &[Requirement]) -> DiffResult {
        let mut result = DiffResult::default();

        let base_index = index_by_id(baseline, DiffSide::Baseline, &mut result.warnings);
        let rev_index = index_by_id(revised, DiffSide::Revised, &mut result.warnings);

        for (id, requirement) in &rev_index {
            if !base_index.contains_key(id) {
                result.added.push((*requirement).clone());
            }
        }

        for (id, base_req) in &base_index {
            let Some(rev_req) = rev_index.get(id) else {
                result.deleted.push((*base_req).clone());
                continue;
            };

            // Sealed hashes make the common identical case one comparison.
            if base_req.content_hash != 0 && base_req.content_hash == rev_req.content_hash {
                result.unchanged.push((*base_req).clone());
                continue;
            }

            let changes = field_changes(base_req, rev_req);
            if changes.is_empty() {
                result.unchanged.push((*base_req).clone());
            } else {
                result.modified.push(ModifiedRequirement {
                    id: (*id).to_string(),
                    baseline: (*base_req).clone(),
                    revised: (*rev_req).clone(),
                    changes,
                });
            }
        }

        result.compute_summary();
        debug!(
            added = result.summary.added,
            deleted = result.summary.deleted,
            modified = result.summary.modified,
            unchanged = result.summary.unchanged,
            "comparison complete"
        );
        result
    }
}

/// Compare two requirement sets with a default engine.
#[must_use]
pub fn compare(baseline: &[Requirement], revised: &[Requirement]) -> DiffResult {
    DiffEngine::new().compare(baseline, revised)
}

/// Index records by id. First occurrence fixes the position, last
/// occurrence wins the value; every repeat is flagged.
fn index_by_id<'a>(
    requirements: &'a [Requirement],
    side: DiffSide,
    warnings: &mut Vec<DuplicateIdWarning>,
) -> IndexMap<&'a str, &'a Requirement> {
    let mut index: IndexMap<&str, &Requirement> = IndexMap::with_capacity(requirements.len());
    for requirement in requirements {
        if index.insert(requirement.id.as_str(), requirement).is_some() {
            warnings.push(DuplicateIdWarning {
                side,
                id: requirement.id.clone(),
            });
        }
    }
    index
}

/// Field-level differences for a matched pair: the three canonical fields
/// in fixed order, then the attribute-key union in baseline declaration
/// order with revised-only keys appended.
fn field_changes(baseline: &Requirement, revised: &Requirement) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    let canonical = [
        ("title", &baseline.title, &revised.title),
        ("description", &baseline.description, &revised.description),
        ("type", &baseline.req_type, &revised.req_type),
    ];
    for (field, old, new) in canonical {
        if old != new {
            changes.push(FieldChange::value_changed(field, old.clone(), new.clone()));
        }
    }

    for (key, old) in &baseline.attributes {
        match revised.attributes.get(key) {
            Some(new) if new == old => {}
            Some(new) => {
                changes.push(FieldChange::value_changed(key, old.to_text(), new.to_text()));
            }
            None => changes.push(FieldChange::removed(key, old.to_text())),
        }
    }
    for (key, new) in &revised.attributes {
        if !baseline.attributes.contains_key(key) {
            changes.push(FieldChange::added(key, new.to_text()));
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::result::ChangeKind;
    use crate::model::CanonicalValue;

    fn requirement(id: &str, title: &str, order: usize) -> Requirement {
        let mut req = Requirement::new(id, order);
        req.title = title.to_string();
        req.seal();
        req
    }

    #[test]
    fn identical_sets_are_all_unchanged() {
        let set = vec![
            requirement("REQ-1", "Start", 0),
            requirement("REQ-2", "Stop", 1),
        ];

        let result = compare(&set, &set);

        assert!(result.is_identical());
        assert_eq!(result.unchanged.len(), 2);
        assert_eq!(result.summary.unchanged_pct, 100.0);
    }

    #[test]
    fn added_and_deleted_swap_under_argument_reversal() {
        let baseline = vec![requirement("REQ-1", "Start", 0)];
        let revised = vec![
            requirement("REQ-1", "Start", 0),
            requirement("REQ-2", "Stop", 1),
        ];

        let forward = compare(&baseline, &revised);
        let backward = compare(&revised, &baseline);

        assert_eq!(forward.added.len(), 1);
        assert_eq!(forward.added[0].id, "REQ-2");
        assert_eq!(backward.deleted.len(), 1);
        assert_eq!(backward.deleted[0].id, "REQ-2");
    }

    #[test]
    fn title_change_is_reported_with_both_values() {
        let baseline = vec![requirement("REQ-1", "Start the pump", 0)];
        let revised = vec![requirement("REQ-1", "Start the pump quickly", 0)];

        let result = compare(&baseline, &revised);

        let modified = result.modification("REQ-1").unwrap();
        assert_eq!(modified.changes.len(), 1);
        let change = &modified.changes[0];
        assert_eq!(change.field, "title");
        assert_eq!(change.kind, ChangeKind::ValueChanged);
        assert_eq!(change.old_value.as_deref(), Some("Start the pump"));
        assert_eq!(change.new_value.as_deref(), Some("Start the pump quickly"));
    }

    #[test]
    fn attribute_union_reports_added_removed_and_changed() {
        let mut base = requirement("REQ-1", "Start", 0);
        base.attributes
            .insert("Status".to_string(), CanonicalValue::from("Draft"));
        base.attributes
            .insert("Owner".to_string(), CanonicalValue::from("QA"));
        base.seal();
        let mut rev = requirement("REQ-1", "Start", 0);
        rev.attributes
            .insert("Status".to_string(), CanonicalValue::from("Approved"));
        rev.attributes
            .insert("Verified".to_string(), CanonicalValue::from("yes"));
        rev.seal();

        let result = compare(&[base], &[rev]);
        let changes = &result.modification("REQ-1").unwrap().changes;

        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].field, "Status");
        assert_eq!(changes[0].kind, ChangeKind::ValueChanged);
        assert_eq!(changes[1].field, "Owner");
        assert_eq!(changes[1].kind, ChangeKind::Removed);
        assert_eq!(changes[2].field, "Verified");
        assert_eq!(changes[2].kind, ChangeKind::Added);
    }

    #[test]
    fn duplicate_ids_resolve_last_wins_with_warning() {
        let baseline = vec![
            requirement("REQ-1", "First occurrence", 0),
            requirement("REQ-1", "Second occurrence", 1),
        ];
        let revised = vec![requirement("REQ-1", "Second occurrence", 0)];

        let result = compare(&baseline, &revised);

        assert!(result.is_identical());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].side, DiffSide::Baseline);
        assert_eq!(result.warnings[0].id, "REQ-1");
    }

    #[test]
    fn outputs_follow_source_order() {
        let baseline = vec![
            requirement("REQ-3", "c", 0),
            requirement("REQ-1", "a", 1),
            requirement("REQ-2", "b", 2),
        ];
        let revised = vec![
            requirement("REQ-9", "z", 0),
            requirement("REQ-8", "y", 1),
        ];

        let result = compare(&baseline, &revised);

        let deleted: Vec<_> = result.deleted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(deleted, ["REQ-3", "REQ-1", "REQ-2"]);
        let added: Vec<_> = result.added.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(added, ["REQ-9", "REQ-8"]);
    }

    #[test]
    fn unsealed_records_still_compare_correctly() {
        // content_hash 0 must not short-circuit the field comparison.
        let base = Requirement::new("REQ-1", 0);
        let mut rev = Requirement::new("REQ-1", 0);
        rev.title = "now titled".to_string();

        let result = compare(&[base], &[rev]);
        assert_eq!(result.modified.len(), 1);
    }
}
