//! Value extraction.
//!
//! Each ReqIF value type has its own extraction routine, dispatched through
//! a lookup table. A failed type-specific parse never aborts the document:
//! the raw text is kept as a plain text value and a warning is recorded.

use chrono::DateTime;
use roxmltree::Node;

use crate::model::{CanonicalValue, DefinitionCatalog, ValueType};
use crate::quality::ParseWarning;

/// Result of extracting one attribute value.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub value: CanonicalValue,
    pub warning: Option<ParseWarning>,
}

impl Extraction {
    fn clean(value: CanonicalValue) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}

type ExtractFn = for<'a, 'input> fn(Node<'a, 'input>, &DefinitionCatalog) -> Result<CanonicalValue, String>;

const EXTRACTORS: [(ValueType, ExtractFn); 7] = [
    (ValueType::String, extract_string),
    (ValueType::Xhtml, extract_xhtml),
    (ValueType::Enumeration, extract_enumeration),
    (ValueType::Integer, extract_integer),
    (ValueType::Real, extract_real),
    (ValueType::Date, extract_date),
    (ValueType::Boolean, extract_boolean),
];

/// Extract the canonical value from one `ATTRIBUTE-VALUE-*` element.
///
/// `definition_ref` only labels warnings; resolution to a long name is the
/// caller's job.
pub fn extract_value(
    node: Node,
    value_type: ValueType,
    definition_ref: &str,
    catalog: &DefinitionCatalog,
) -> Extraction {
    let Some((_, extractor)) = EXTRACTORS.iter().find(|(vt, _)| *vt == value_type) else {
        // Unrecognized value-type tag: fall back to generic text so the
        // content is not lost.
        return Extraction {
            value: CanonicalValue::from(raw_text(node)),
            warning: Some(ParseWarning::UnsupportedValueType {
                definition_ref: definition_ref.to_string(),
                tag: node.tag_name().name().to_string(),
            }),
        };
    };

    match extractor(node, catalog) {
        Ok(value) => Extraction::clean(value),
        Err(message) => {
            let raw = raw_text(node);
            Extraction {
                value: CanonicalValue::from(raw.clone()),
                warning: Some(ParseWarning::AttributeExtraction {
                    definition_ref: definition_ref.to_string(),
                    value_type: value_type.name().to_string(),
                    raw_text: raw,
                    message,
                }),
            }
        }
    }
}

/// THE-VALUE payload as normalized text: the attribute form wins, then the
/// child-element form, then the element's own text content.
fn raw_text(node: Node) -> String {
    if let Some(attr) = super::locate::attr_ci(node, "THE-VALUE") {
        return normalize_whitespace(attr);
    }
    if let Some(child) = child_ci(node, "THE-VALUE") {
        return normalize_whitespace(&all_text(child));
    }
    normalize_whitespace(&all_text(node))
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn child_ci<'a, 'input>(node: Node<'a, 'input>, local_name: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .filter(Node::is_element)
        .find(|n| n.tag_name().name().eq_ignore_ascii_case(local_name))
}

fn all_text(node: Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn extract_string(node: Node, _catalog: &DefinitionCatalog) -> Result<CanonicalValue, String> {
    Ok(CanonicalValue::from(raw_text(node)))
}

fn extract_xhtml(node: Node, _catalog: &DefinitionCatalog) -> Result<CanonicalValue, String> {
    let scope = child_ci(node, "THE-VALUE").unwrap_or(node);
    Ok(CanonicalValue::from(flatten_xhtml(scope)))
}

fn extract_enumeration(node: Node, catalog: &DefinitionCatalog) -> Result<CanonicalValue, String> {
    let mut labels = Vec::new();
    for reference in node
        .descendants()
        .skip(1)
        .filter(Node::is_element)
        .filter(|n| n.tag_name().name().eq_ignore_ascii_case("ENUM-VALUE-REF"))
    {
        let raw_ref = super::locate::attr_ci(reference, "REF")
            .map(str::to_string)
            .or_else(|| reference.text().map(|t| t.trim().to_string()))
            .unwrap_or_default();
        if !raw_ref.is_empty() {
            labels.push(catalog.enum_label(&raw_ref).to_string());
        }
    }
    Ok(CanonicalValue::from(labels.join(", ")))
}

fn extract_integer(node: Node, _catalog: &DefinitionCatalog) -> Result<CanonicalValue, String> {
    let raw = raw_text(node);
    raw.parse::<i64>()
        .map(CanonicalValue::Integer)
        .map_err(|e| format!("invalid integer literal {raw:?}: {e}"))
}

fn extract_real(node: Node, _catalog: &DefinitionCatalog) -> Result<CanonicalValue, String> {
    let raw = raw_text(node);
    raw.parse::<f64>()
        .map(CanonicalValue::Real)
        .map_err(|e| format!("invalid real literal {raw:?}: {e}"))
}

fn extract_date(node: Node, _catalog: &DefinitionCatalog) -> Result<CanonicalValue, String> {
    let raw = raw_text(node);
    DateTime::parse_from_rfc3339(&raw)
        .map(CanonicalValue::Date)
        .map_err(|e| format!("invalid date literal {raw:?}: {e}"))
}

fn extract_boolean(node: Node, _catalog: &DefinitionCatalog) -> Result<CanonicalValue, String> {
    let raw = raw_text(node);
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(CanonicalValue::Boolean(true)),
        "false" | "0" => Ok(CanonicalValue::Boolean(false)),
        _ => Err(format!("invalid boolean literal {raw:?}")),
    }
}

/// Flatten XHTML content to plain text. Block elements and `<br/>` become
/// paragraph breaks, inline markup is dropped, and `<object>` embeds are
/// replaced with their alt text unless it is the Word OLE placeholder.
pub fn flatten_xhtml(scope: Node) -> String {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    walk_xhtml(scope, &mut paragraphs, &mut current);
    flush_paragraph(&mut paragraphs, &mut current);
    paragraphs.join("\n")
}

fn walk_xhtml(node: Node, paragraphs: &mut Vec<String>, current: &mut String) {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text() {
                current.push_str(text);
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }
        let local = child.tag_name().name();
        if local.eq_ignore_ascii_case("p") || local.eq_ignore_ascii_case("div") {
            flush_paragraph(paragraphs, current);
            walk_xhtml(child, paragraphs, current);
            flush_paragraph(paragraphs, current);
        } else if local.eq_ignore_ascii_case("br") {
            flush_paragraph(paragraphs, current);
        } else if local.eq_ignore_ascii_case("object") {
            if let Some(alt) = super::locate::attr_ci(child, "alt") {
                if !alt.eq_ignore_ascii_case("OLE Object") {
                    current.push(' ');
                    current.push_str(alt);
                }
            }
        } else {
            // Inline markup contributes its text content only.
            walk_xhtml(child, paragraphs, current);
        }
    }
}

fn flush_paragraph(paragraphs: &mut Vec<String>, current: &mut String) {
    let normalized = normalize_whitespace(current);
    if !normalized.is_empty() {
        paragraphs.push(normalized);
    }
    current.clear();
}
