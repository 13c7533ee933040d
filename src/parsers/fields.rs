//! Heuristic field mapping.
//!
//! Nothing in ReqIF says which attribute is "the title". Each semantic
//! field carries a keyword list; attribute names are scored by keyword
//! hits and the best unclaimed attribute wins. Scoring runs on the
//! definition long name when the catalog resolved one, else on the raw
//! reference, so mapping degrades gracefully on catalog-less documents.

use std::collections::HashSet;

use tracing::trace;

use crate::model::{DefinitionCatalog, Requirement, ValueType};
use crate::quality::{ParseDiagnostics, ParseWarning};

/// The semantic fields the mapper can populate, in mapping priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    ReqType,
    Priority,
}

impl Field {
    const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::ReqType => "type",
            Self::Priority => "priority",
        }
    }
}

const FIELD_KEYWORDS: [(Field, &[&str]); 4] = [
    (
        Field::Title,
        &["title", "name", "heading", "object", "caption", "summary"],
    ),
    (
        Field::Description,
        &[
            "description",
            "detail",
            "content",
            "specification",
            "rationale",
            "text",
        ],
    ),
    (Field::ReqType, &["type", "kind", "category", "classification"]),
    (
        Field::Priority,
        &["priority", "importance", "criticality", "level"],
    ),
];

/// Populate the record's semantic fields from its raw attributes. Each
/// attribute is claimed by at most one field; ties break toward the
/// earliest-declared attribute.
pub fn map_fields(
    requirement: &mut Requirement,
    catalog: &DefinitionCatalog,
    diagnostics: &mut ParseDiagnostics,
) {
    let mut claimed: HashSet<usize> = HashSet::new();

    for (field, keywords) in FIELD_KEYWORDS {
        // A type already resolved through SPEC-OBJECT-TYPE-REF outranks any
        // keyword guess.
        if field == Field::ReqType && !requirement.req_type.is_empty() {
            continue;
        }

        let best = requirement
            .raw_attributes
            .iter()
            .enumerate()
            .filter(|(idx, (_, value))| !claimed.contains(idx) && !value.is_empty())
            .map(|(idx, (raw_ref, value))| {
                let name = display_name(catalog, raw_ref);
                (idx, score(&name, keywords), value)
            })
            .filter(|(_, score, _)| *score >= 1)
            .max_by_key(|(idx, score, _)| (*score, std::cmp::Reverse(*idx)));

        if let Some((idx, hit_score, value)) = best {
            trace!(
                field = field.name(),
                score = hit_score,
                "mapped attribute to semantic field"
            );
            let text = value.to_text();
            claimed.insert(idx);
            assign(requirement, field, text);
            continue;
        }

        apply_fallback(requirement, field, catalog, &mut claimed, diagnostics);
    }
}

fn display_name<'a>(catalog: &'a DefinitionCatalog, raw_ref: &'a str) -> String {
    catalog
        .definition(raw_ref)
        .map_or(raw_ref, |entry| entry.long_name.as_str())
        .to_ascii_lowercase()
}

/// Number of keywords the lowercased attribute name contains.
fn score(name: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| name.contains(*kw)).count()
}

fn assign(requirement: &mut Requirement, field: Field, text: String) {
    match field {
        Field::Title => requirement.title = text,
        Field::Description => requirement.description = text,
        Field::ReqType => requirement.req_type = text,
        Field::Priority => requirement.priority = text,
    }
}

/// No attribute scored for the field. Title and description fall back to
/// the first unclaimed string-typed attribute; title further falls back to
/// the record id. Either fallback is recorded as an ambiguity.
fn apply_fallback(
    requirement: &mut Requirement,
    field: Field,
    catalog: &DefinitionCatalog,
    claimed: &mut HashSet<usize>,
    diagnostics: &mut ParseDiagnostics,
) {
    if field != Field::Title && field != Field::Description {
        return;
    }

    let first_string = requirement
        .raw_attributes
        .iter()
        .enumerate()
        .filter(|(idx, (_, value))| !claimed.contains(idx) && !value.is_empty())
        .find(|(_, (raw_ref, _))| {
            catalog
                .definition(raw_ref)
                .is_some_and(|entry| entry.value_type == ValueType::String)
        })
        .map(|(idx, (_, value))| (idx, value.to_text()));

    match (field, first_string) {
        (_, Some((idx, text))) => {
            claimed.insert(idx);
            diagnostics.warn(ParseWarning::FieldMappingAmbiguity {
                requirement_id: requirement.id.clone(),
                field: field.name().to_string(),
            });
            assign(requirement, field, text);
        }
        (Field::Title, None) => {
            diagnostics.warn(ParseWarning::FieldMappingAmbiguity {
                requirement_id: requirement.id.clone(),
                field: field.name().to_string(),
            });
            requirement.title = requirement.id.clone();
        }
        _ => {}
    }
}
