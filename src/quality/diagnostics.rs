//! Parse diagnostics.
//!
//! Vendor-variant input is the expected common case, so almost nothing the
//! parser trips over is fatal. Everything non-fatal accumulates here and is
//! frozen when the parse call returns.

use serde::{Deserialize, Serialize};

use super::scorer;
use crate::model::Requirement;

/// How the document's ReqIF namespace was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceMode {
    /// Root namespace matched a registered ReqIF namespace URI.
    Known,
    /// A root-level declaration contained a ReqIF-like token.
    Heuristic,
    /// No recognizable namespace; elements are matched unqualified.
    Absent,
}

/// Which element-discovery strategy produced a non-empty result.
///
/// Tiers are ordered by confidence; `CaseInsensitive` is the lossy last
/// resort for vendor tag casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryTier {
    /// Resolved namespace URI + exact local name.
    Qualified,
    /// Any namespace declared on the document + exact local name.
    Declared,
    /// Exact local name, namespace ignored.
    LocalName,
    /// Case-insensitive local name.
    CaseInsensitive,
}

/// Per-tier counts of successful element lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub qualified: usize,
    pub declared: usize,
    pub local_name: usize,
    pub case_insensitive: usize,
}

impl TierCounts {
    /// Record one successful lookup at the given tier.
    pub fn record(&mut self, tier: DiscoveryTier) {
        match tier {
            DiscoveryTier::Qualified => self.qualified += 1,
            DiscoveryTier::Declared => self.declared += 1,
            DiscoveryTier::LocalName => self.local_name += 1,
            DiscoveryTier::CaseInsensitive => self.case_insensitive += 1,
        }
    }

    /// Fold another count set into this one.
    pub fn merge(&mut self, other: &Self) {
        self.qualified += other.qualified;
        self.declared += other.declared;
        self.local_name += other.local_name;
        self.case_insensitive += other.case_insensitive;
    }

    /// Total successful lookups across tiers.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.qualified + self.declared + self.local_name + self.case_insensitive
    }

    /// True when any lookup needed the low-confidence tiers (3 or 4).
    #[must_use]
    pub const fn used_fallback(&self) -> bool {
        self.local_name > 0 || self.case_insensitive > 0
    }
}

/// One non-fatal irregularity recorded during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A value failed its type-specific parse; the raw text was kept.
    AttributeExtraction {
        definition_ref: String,
        value_type: String,
        raw_text: String,
        message: String,
    },
    /// An attribute value carried an unrecognized value-type tag.
    UnsupportedValueType { definition_ref: String, tag: String },
    /// No attribute scored confidently for a semantic field; the
    /// documented fallback was applied.
    FieldMappingAmbiguity { requirement_id: String, field: String },
    /// Two requirements in one file share an id.
    DuplicateId { id: String },
    /// A SPEC-OBJECT carried no identifier; one was synthesized.
    MissingIdentifier { source_order: usize },
}

/// File-level diagnostics returned alongside the parsed records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    /// How the namespace was resolved.
    pub namespace_mode: NamespaceMode,
    /// The resolved namespace URI, when one exists.
    pub namespace_uri: Option<String>,
    /// Per-tier element-discovery counts.
    pub discovery: TierCounts,
    /// Number of SPEC-OBJECT elements found in the document.
    pub spec_object_count: usize,
    /// Number of attribute definitions resolved into the catalog.
    pub definition_count: usize,
    /// Accumulated non-fatal warnings, in occurrence order.
    pub warnings: Vec<ParseWarning>,
    /// Fraction of records with a non-empty title or description.
    pub resolution_rate: f64,
    /// Composite quality score, 0–100.
    pub quality_score: f64,
}

impl ParseDiagnostics {
    /// Empty diagnostics for a parse that has not started discovery yet.
    #[must_use]
    pub fn new(namespace_mode: NamespaceMode, namespace_uri: Option<String>) -> Self {
        Self {
            namespace_mode,
            namespace_uri,
            discovery: TierCounts::default(),
            spec_object_count: 0,
            definition_count: 0,
            warnings: Vec::new(),
            resolution_rate: 0.0,
            quality_score: 0.0,
        }
    }

    /// Record a non-fatal warning.
    pub fn warn(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Number of attribute extraction failures recorded.
    #[must_use]
    pub fn extraction_failure_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ParseWarning::AttributeExtraction { .. }))
            .count()
    }

    /// Fold a later bundle member's diagnostics into this one. The first
    /// member's namespace resolution stands for the bundle.
    pub fn absorb(&mut self, other: Self) {
        self.discovery.merge(&other.discovery);
        self.spec_object_count += other.spec_object_count;
        self.definition_count += other.definition_count;
        self.warnings.extend(other.warnings);
    }

    /// Compute the resolution rate and composite quality score from the
    /// final record set. Called exactly once, when the parse completes.
    pub fn finalize(&mut self, requirements: &[Requirement]) {
        self.resolution_rate = scorer::resolution_rate(requirements);
        self.quality_score = scorer::quality_score(requirements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_counts_accumulate() {
        let mut counts = TierCounts::default();
        counts.record(DiscoveryTier::Qualified);
        counts.record(DiscoveryTier::LocalName);
        counts.record(DiscoveryTier::LocalName);

        assert_eq!(counts.qualified, 1);
        assert_eq!(counts.local_name, 2);
        assert_eq!(counts.total(), 3);
        assert!(counts.used_fallback());
    }

    #[test]
    fn finalize_computes_resolution_rate() {
        let mut resolved = Requirement::new("REQ-1", 0);
        resolved.title = "System shall start".to_string();
        let unresolved = Requirement::new("REQ-2", 1);

        let mut diag = ParseDiagnostics::new(NamespaceMode::Absent, None);
        diag.finalize(&[resolved, unresolved]);

        assert!((diag.resolution_rate - 0.5).abs() < f64::EPSILON);
    }
}
