//! Definition catalog: per-parse reference data.
//!
//! ReqIF attribute values reference attribute definitions by id, and
//! enumeration values reference enum literals by id. The catalog is built
//! once per parsed document and never shared across parse calls.

use super::ValueType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One attribute definition declared in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionEntry {
    /// Declared identifier, referenced by attribute values.
    pub id: String,
    /// Human-readable name; falls back to the id when the document
    /// declares none.
    pub long_name: String,
    /// Declared value type.
    pub value_type: ValueType,
}

/// Reference data resolved from a single document's definition sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionCatalog {
    /// Attribute definition id → entry, in declaration order.
    pub attribute_definitions: IndexMap<String, DefinitionEntry>,
    /// Enum value id → human-readable label.
    pub enum_values: IndexMap<String, String>,
    /// Spec-object type id → human-readable label.
    pub spec_object_types: IndexMap<String, String>,
}

impl DefinitionCatalog {
    /// Look up an attribute definition by its declared id.
    #[must_use]
    pub fn definition(&self, id: &str) -> Option<&DefinitionEntry> {
        self.attribute_definitions.get(id)
    }

    /// Resolve an enum value reference to its label, keeping the raw
    /// reference when the document never declared it.
    #[must_use]
    pub fn enum_label<'a>(&'a self, reference: &'a str) -> &'a str {
        self.enum_values
            .get(reference)
            .map_or(reference, String::as_str)
    }

    /// Resolve a spec-object type reference to its label, keeping the raw
    /// reference when unknown.
    #[must_use]
    pub fn type_label<'a>(&'a self, reference: &'a str) -> &'a str {
        self.spec_object_types
            .get(reference)
            .map_or(reference, String::as_str)
    }

    /// Total number of catalog entries, for diagnostics.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.attribute_definitions.len() + self.enum_values.len() + self.spec_object_types.len()
    }
}
