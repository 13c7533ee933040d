//! SPEC-OBJECT assembly.
//!
//! Turns one SPEC-OBJECT element into a sealed [`Requirement`]: identifier,
//! resolved type, extracted attribute values, and heuristically mapped
//! semantic fields.

use roxmltree::Node;
use tracing::trace;

use super::extract;
use super::fields;
use super::locate::{self, attr_any};
use super::namespace::NamespaceContext;
use crate::model::{DefinitionCatalog, Requirement, ValueType};
use crate::quality::{ParseDiagnostics, ParseWarning};

const ID_ATTRS: &[&str] = &["IDENTIFIER", "ID"];

/// Assemble the requirement record for one SPEC-OBJECT element.
///
/// `index` is the element's zero-based position among the document's
/// SPEC-OBJECTs; it seeds the synthesized id when the element carries none.
pub fn assemble(
    spec_object: Node,
    index: usize,
    catalog: &DefinitionCatalog,
    ns: &NamespaceContext,
    diagnostics: &mut ParseDiagnostics,
) -> Requirement {
    let id = match attr_any(spec_object, ID_ATTRS) {
        Some(id) => id.to_string(),
        None => {
            diagnostics.warn(ParseWarning::MissingIdentifier {
                source_order: index,
            });
            format!("REQ_{index}")
        }
    };
    trace!(id = %id, "assembling spec object");
    let mut requirement = Requirement::new(id, index);

    requirement.req_type = resolve_type(spec_object, catalog, ns, diagnostics);
    collect_values(spec_object, catalog, ns, &mut requirement, diagnostics);
    fields::map_fields(&mut requirement, catalog, diagnostics);
    requirement.seal();
    requirement
}

/// Resolve the spec-object type through its TYPE element, tolerating both
/// the attribute and child-element reference forms.
fn resolve_type(
    spec_object: Node,
    catalog: &DefinitionCatalog,
    ns: &NamespaceContext,
    diagnostics: &mut ParseDiagnostics,
) -> String {
    let Some(type_node) = locate::find_first(spec_object, "TYPE", ns, &mut diagnostics.discovery)
    else {
        return String::new();
    };
    let reference = locate::attr_ci(type_node, "SPEC-OBJECT-TYPE-REF")
        .map(str::to_string)
        .or_else(|| {
            type_node
                .descendants()
                .skip(1)
                .filter(Node::is_element)
                .find(|n| n.tag_name().name().eq_ignore_ascii_case("SPEC-OBJECT-TYPE-REF"))
                .and_then(|n| n.text())
                .map(|t| t.trim().to_string())
        });
    match reference {
        Some(r) if !r.is_empty() => catalog.type_label(&r).to_string(),
        _ => String::new(),
    }
}

/// Extract every attribute value under the SPEC-OBJECT's VALUES container.
///
/// Known value-type tags go through the tiered locator; anything else tagged
/// `ATTRIBUTE-VALUE-*` is still extracted as generic text so vendor types
/// are not dropped.
fn collect_values(
    spec_object: Node,
    catalog: &DefinitionCatalog,
    ns: &NamespaceContext,
    requirement: &mut Requirement,
    diagnostics: &mut ParseDiagnostics,
) {
    let scope =
        locate::find_first(spec_object, "VALUES", ns, &mut diagnostics.discovery).unwrap_or(spec_object);

    let mut seen = Vec::new();
    for value_type in ValueType::KNOWN {
        let tag = format!("ATTRIBUTE-VALUE-{}", value_type.name());
        for node in locate::find_all(scope, &tag, ns, &mut diagnostics.discovery) {
            seen.push(node.id());
            store_value(node, value_type, catalog, requirement, diagnostics);
        }
    }

    // Sweep for unrecognized ATTRIBUTE-VALUE-* tags the typed lookups missed.
    for node in scope.descendants().skip(1).filter(Node::is_element) {
        if seen.contains(&node.id()) {
            continue;
        }
        let local = node.tag_name().name().to_ascii_uppercase();
        if !local.starts_with("ATTRIBUTE-VALUE-") {
            continue;
        }
        let value_type = ValueType::from_local_name(&local).unwrap_or(ValueType::Unknown);
        if value_type == ValueType::Unknown {
            store_value(node, ValueType::Unknown, catalog, requirement, diagnostics);
        }
    }
}

fn store_value(
    node: Node,
    value_type: ValueType,
    catalog: &DefinitionCatalog,
    requirement: &mut Requirement,
    diagnostics: &mut ParseDiagnostics,
) {
    let Some(reference) = definition_reference(node) else {
        return;
    };

    let extraction = extract::extract_value(node, value_type, &reference, catalog);
    if let Some(warning) = extraction.warning {
        diagnostics.warn(warning);
    }
    if extraction.value.is_empty() {
        return;
    }

    let canonical_key = catalog
        .definition(&reference)
        .map_or(reference.as_str(), |entry| entry.long_name.as_str())
        .to_string();
    requirement
        .attributes
        .insert(canonical_key, extraction.value.clone());
    requirement.raw_attributes.insert(reference, extraction.value);
}

/// The attribute-definition reference, from the reference attribute or the
/// DEFINITION child element's `*-REF` text.
fn definition_reference(node: Node) -> Option<String> {
    if let Some(attr) = locate::attr_ci(node, "ATTRIBUTE-DEFINITION-REF") {
        return Some(attr.to_string());
    }
    let definition = node
        .children()
        .filter(Node::is_element)
        .find(|n| n.tag_name().name().eq_ignore_ascii_case("DEFINITION"))?;
    definition
        .descendants()
        .skip(1)
        .filter(Node::is_element)
        .find(|n| {
            n.tag_name()
                .name()
                .to_ascii_uppercase()
                .ends_with("-REF")
        })
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
