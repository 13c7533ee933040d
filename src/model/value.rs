//! Attribute value types.
//!
//! ReqIF tags attribute values by type (`ATTRIBUTE-VALUE-STRING`,
//! `ATTRIBUTE-VALUE-XHTML`, ...). [`ValueType`] is the closed set of those
//! tags and [`CanonicalValue`] the normalized form the extractor produces.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared value type of a ReqIF attribute definition or attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    String,
    Xhtml,
    Enumeration,
    Integer,
    Real,
    Date,
    Boolean,
    /// Vendor-specific or unrecognized type tag.
    Unknown,
}

impl ValueType {
    /// All concretely typed variants, in the order ReqIF declares them.
    pub const KNOWN: [Self; 7] = [
        Self::String,
        Self::Xhtml,
        Self::Enumeration,
        Self::Integer,
        Self::Real,
        Self::Date,
        Self::Boolean,
    ];

    /// Derive the value type from a tag suffix such as `STRING` in
    /// `ATTRIBUTE-VALUE-STRING` or `ATTRIBUTE-DEFINITION-STRING`.
    ///
    /// Matching is case-insensitive to tolerate vendor tag casing.
    #[must_use]
    pub fn from_tag_suffix(suffix: &str) -> Self {
        match suffix.to_ascii_uppercase().as_str() {
            "STRING" => Self::String,
            "XHTML" => Self::Xhtml,
            "ENUMERATION" => Self::Enumeration,
            "INTEGER" => Self::Integer,
            "REAL" => Self::Real,
            "DATE" => Self::Date,
            "BOOLEAN" => Self::Boolean,
            _ => Self::Unknown,
        }
    }

    /// Derive the value type from a full local tag name like
    /// `ATTRIBUTE-VALUE-XHTML`. Returns `None` if the tag is not an
    /// attribute-value or attribute-definition element at all.
    #[must_use]
    pub fn from_local_name(local: &str) -> Option<Self> {
        let upper = local.to_ascii_uppercase();
        for prefix in ["ATTRIBUTE-VALUE-", "ATTRIBUTE-DEFINITION-"] {
            if let Some(suffix) = upper.strip_prefix(prefix) {
                return Some(Self::from_tag_suffix(suffix));
            }
        }
        None
    }

    /// Canonical name of this type, matching the ReqIF tag suffix.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Xhtml => "XHTML",
            Self::Enumeration => "ENUMERATION",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Date => "DATE",
            Self::Boolean => "BOOLEAN",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized, extracted attribute value.
///
/// Textual variants carry already-normalized text (whitespace collapsed,
/// markup stripped). Typed variants carry the parsed literal; a literal that
/// failed its type-specific parse is kept as `Text` with the raw content so
/// no data is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Date(DateTime<FixedOffset>),
    Text(String),
}

impl CanonicalValue {
    /// Canonical textual representation, used for field-change reporting
    /// and content hashing.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Real(r) => r.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Date(d) => d.to_rfc3339(),
        }
    }

    /// True when the value carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            other => f.write_str(&other.to_text()),
        }
    }
}

impl From<&str> for CanonicalValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
