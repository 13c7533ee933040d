//! Definition catalog construction.
//!
//! One pass over the document collects attribute definitions, enum value
//! literals, and spec-object types before any SPEC-OBJECT is touched, so
//! value extraction can resolve references immediately.

use roxmltree::Node;
use tracing::debug;

use super::locate::{self, attr_any};
use super::namespace::NamespaceContext;
use crate::model::{DefinitionCatalog, DefinitionEntry, ValueType};
use crate::quality::TierCounts;

const ID_ATTRS: &[&str] = &["IDENTIFIER", "ID"];
const NAME_ATTRS: &[&str] = &["LONG-NAME", "NAME"];

/// Build the definition catalog for one document.
pub fn build(root: Node, ns: &NamespaceContext, counts: &mut TierCounts) -> DefinitionCatalog {
    let mut catalog = DefinitionCatalog::default();

    for value_type in ValueType::KNOWN {
        let tag = format!("ATTRIBUTE-DEFINITION-{}", value_type.name());
        for node in locate::find_all(root, &tag, ns, counts) {
            let Some(id) = attr_any(node, ID_ATTRS) else {
                continue;
            };
            let long_name = attr_any(node, NAME_ATTRS).unwrap_or(id);
            catalog.attribute_definitions.insert(
                id.to_string(),
                DefinitionEntry {
                    id: id.to_string(),
                    long_name: long_name.to_string(),
                    value_type,
                },
            );
        }
    }

    for node in locate::find_all(root, "ENUM-VALUE", ns, counts) {
        let Some(id) = attr_any(node, ID_ATTRS) else {
            continue;
        };
        let label = attr_any(node, NAME_ATTRS).unwrap_or(id);
        catalog
            .enum_values
            .insert(id.to_string(), label.to_string());
    }

    for node in locate::find_all(root, "SPEC-OBJECT-TYPE", ns, counts) {
        let Some(id) = attr_any(node, ID_ATTRS) else {
            continue;
        };
        let label = attr_any(node, NAME_ATTRS).unwrap_or(id);
        catalog
            .spec_object_types
            .insert(id.to_string(), label.to_string());
    }

    debug!(
        definitions = catalog.attribute_definitions.len(),
        enum_values = catalog.enum_values.len(),
        spec_object_types = catalog.spec_object_types.len(),
        "definition catalog built"
    );
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_from(xml: &str) -> DefinitionCatalog {
        let doc = roxmltree::Document::parse(xml).unwrap();
        let ctx = NamespaceContext::resolve(doc.root_element());
        let mut counts = TierCounts::default();
        build(doc.root_element(), &ctx, &mut counts)
    }

    #[test]
    fn collects_typed_attribute_definitions() {
        let catalog = build_from(
            r#"<REQ-IF>
                <ATTRIBUTE-DEFINITION-STRING IDENTIFIER="AD-1" LONG-NAME="Title"/>
                <ATTRIBUTE-DEFINITION-INTEGER IDENTIFIER="AD-2" LONG-NAME="Estimate"/>
            </REQ-IF>"#,
        );

        assert_eq!(catalog.attribute_definitions.len(), 2);
        let entry = catalog.definition("AD-2").unwrap();
        assert_eq!(entry.long_name, "Estimate");
        assert_eq!(entry.value_type, ValueType::Integer);
    }

    #[test]
    fn long_name_falls_back_to_identifier() {
        let catalog = build_from(
            r#"<REQ-IF><ATTRIBUTE-DEFINITION-STRING IDENTIFIER="AD-1"/></REQ-IF>"#,
        );
        assert_eq!(catalog.definition("AD-1").unwrap().long_name, "AD-1");
    }

    #[test]
    fn collects_enum_values_and_spec_object_types() {
        let catalog = build_from(
            r#"<REQ-IF>
                <DATATYPE-DEFINITION-ENUMERATION IDENTIFIER="DT-1">
                    <ENUM-VALUE IDENTIFIER="EV-1" LONG-NAME="High"/>
                    <ENUM-VALUE IDENTIFIER="EV-2" LONG-NAME="Low"/>
                </DATATYPE-DEFINITION-ENUMERATION>
                <SPEC-OBJECT-TYPE IDENTIFIER="SOT-1" LONG-NAME="Functional Requirement"/>
            </REQ-IF>"#,
        );

        assert_eq!(catalog.enum_label("EV-1"), "High");
        assert_eq!(catalog.type_label("SOT-1"), "Functional Requirement");
        assert_eq!(catalog.entry_count(), 3);
    }

    #[test]
    fn entries_without_identifier_are_skipped() {
        let catalog = build_from(
            r#"<REQ-IF><ATTRIBUTE-DEFINITION-STRING LONG-NAME="Nameless"/></REQ-IF>"#,
        );
        assert_eq!(catalog.entry_count(), 0);
    }
}
