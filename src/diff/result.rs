//! Comparison result types.

use serde::{Deserialize, Serialize};

use crate::model::Requirement;

/// What happened to one field or attribute between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present only on the revised side.
    Added,
    /// Present only on the baseline side.
    Removed,
    /// Present on both sides with different values.
    ValueChanged,
}

/// One field-level difference inside a matched requirement pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Canonical field name: `title`, `description`, `type`, or an
    /// attribute's long name.
    pub field: String,
    pub kind: ChangeKind,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl FieldChange {
    pub(crate) fn value_changed(
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ChangeKind::ValueChanged,
            old_value: Some(old_value.into()),
            new_value: Some(new_value.into()),
        }
    }

    pub(crate) fn added(field: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ChangeKind::Added,
            old_value: None,
            new_value: Some(new_value.into()),
        }
    }

    pub(crate) fn removed(field: impl Into<String>, old_value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ChangeKind::Removed,
            old_value: Some(old_value.into()),
            new_value: None,
        }
    }
}

/// A requirement present on both sides with at least one field change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedRequirement {
    pub id: String,
    pub baseline: Requirement,
    pub revised: Requirement,
    /// Field changes: canonical fields first, then attributes in baseline
    /// declaration order, then revised-only attributes.
    pub changes: Vec<FieldChange>,
}

/// Which comparison side a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSide {
    Baseline,
    Revised,
}

/// One side handed the comparator more than one record with the same id.
/// The last occurrence was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateIdWarning {
    pub side: DiffSide,
    pub id: String,
}

/// Aggregate statistics over one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub unchanged: usize,
    /// Total distinct requirement ids across both sides.
    pub total_compared: usize,
    /// Field changes summed over all modified requirements.
    pub field_change_count: usize,
    pub added_pct: f64,
    pub deleted_pct: f64,
    pub modified_pct: f64,
    pub unchanged_pct: f64,
}

impl DiffSummary {
    fn pct(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    }
}

/// Complete result of one structural comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Present only in the revised set, in revised source order.
    pub added: Vec<Requirement>,
    /// Present only in the baseline set, in baseline source order.
    pub deleted: Vec<Requirement>,
    /// Present in both with field changes, in baseline source order.
    pub modified: Vec<ModifiedRequirement>,
    /// Present in both and identical, in baseline source order.
    pub unchanged: Vec<Requirement>,
    /// Duplicate ids observed while indexing either side.
    pub warnings: Vec<DuplicateIdWarning>,
    pub summary: DiffSummary,
}

impl DiffResult {
    /// True when the two sets are structurally identical.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    /// Look up the modification entry for one requirement id.
    #[must_use]
    pub fn modification(&self, id: &str) -> Option<&ModifiedRequirement> {
        self.modified.iter().find(|m| m.id == id)
    }

    pub(crate) fn compute_summary(&mut self) {
        let added = self.added.len();
        let deleted = self.deleted.len();
        let modified = self.modified.len();
        let unchanged = self.unchanged.len();
        let total = added + deleted + modified + unchanged;
        self.summary = DiffSummary {
            added,
            deleted,
            modified,
            unchanged,
            total_compared: total,
            field_change_count: self.modified.iter().map(|m| m.changes.len()).sum(),
            added_pct: DiffSummary::pct(added, total),
            deleted_pct: DiffSummary::pct(deleted, total),
            modified_pct: DiffSummary::pct(modified, total),
            unchanged_pct: DiffSummary::pct(unchanged, total),
        };
    }
}

impl Default for DiffResult {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            deleted: Vec::new(),
            modified: Vec::new(),
            unchanged: Vec::new(),
            warnings: Vec::new(),
            summary: DiffSummary {
                added: 0,
                deleted: 0,
                modified: 0,
                unchanged: 0,
                total_compared: 0,
                field_change_count: 0,
                added_pct: 0.0,
                deleted_pct: 0.0,
                modified_pct: 0.0,
                unchanged_pct: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_percentages_cover_all_categories() {
        let mut result = DiffResult::default();
        result.added.push(Requirement::new("REQ-3", 0));
        result.unchanged.push(Requirement::new("REQ-1", 0));
        result.unchanged.push(Requirement::new("REQ-2", 1));
        result.compute_summary();

        assert_eq!(result.summary.total_compared, 3);
        assert!((result.summary.added_pct - 100.0 / 3.0).abs() < 1e-9);
        assert!((result.summary.unchanged_pct - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.summary.field_change_count, 0);
    }

    #[test]
    fn empty_comparison_has_zero_percentages() {
        let mut result = DiffResult::default();
        result.compute_summary();
        assert_eq!(result.summary.total_compared, 0);
        assert!(result.summary.added_pct.abs() < f64::EPSILON);
        assert!(result.is_identical());
    }
}
