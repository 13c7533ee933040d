//! Canonical requirement record.

use super::CanonicalValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// One requirement parsed from a ReqIF document — the canonical
/// tool-agnostic record.
///
/// The four top-level string fields are always present, possibly empty.
/// `raw_attributes` is the audit trail: every value the extractor managed
/// to pull out of the document, keyed by the raw attribute-definition
/// reference, regardless of whether field mapping or definition resolution
/// succeeded. Records are immutable once the parser returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requirement identifier, unique within one parsed file.
    pub id: String,
    /// Best-effort title, empty when nothing mapped.
    pub title: String,
    /// Best-effort description, empty when nothing mapped.
    pub description: String,
    /// Requirement type, resolved through the spec-object-type catalog.
    pub req_type: String,
    /// Best-effort priority, empty when nothing mapped.
    pub priority: String,
    /// Canonical field name (the definition's long name) → extracted value.
    pub attributes: IndexMap<String, CanonicalValue>,
    /// Raw attribute-definition reference → extracted value. Never loses
    /// data the extractor produced, even when `attributes` is incomplete.
    pub raw_attributes: IndexMap<String, CanonicalValue>,
    /// Zero-based position of the SPEC-OBJECT in the source file.
    pub source_order: usize,
    /// Content hash over all compared fields, for fast equality checks.
    #[serde(skip)]
    pub content_hash: u64,
}

impl Requirement {
    /// Create an empty record at the given source position.
    #[must_use]
    pub fn new(id: impl Into<String>, source_order: usize) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            req_type: String::new(),
            priority: String::new(),
            attributes: IndexMap::new(),
            raw_attributes: IndexMap::new(),
            source_order,
            content_hash: 0,
        }
    }

    /// Compute and store the content hash over every field the comparator
    /// inspects. Keys are hashed sorted so the hash is independent of
    /// attribute declaration order.
    pub fn seal(&mut self) {
        let mut input = Vec::new();
        input.extend_from_slice(self.id.as_bytes());
        input.push(0);
        input.extend_from_slice(self.title.as_bytes());
        input.push(0);
        input.extend_from_slice(self.description.as_bytes());
        input.push(0);
        input.extend_from_slice(self.req_type.as_bytes());
        input.push(0);

        let mut keys: Vec<_> = self.attributes.keys().collect();
        keys.sort();
        for key in keys {
            input.extend_from_slice(key.as_bytes());
            input.push(1);
            if let Some(value) = self.attributes.get(key) {
                input.extend_from_slice(value.to_text().as_bytes());
            }
            input.push(0);
        }

        self.content_hash = xxh3_64(&input);
    }

    /// True when the record carries a non-empty title or description —
    /// the bar for counting it as "resolved" in diagnostics.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty()
    }
}
