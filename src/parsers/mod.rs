//! Tolerant ReqIF parsing.
//!
//! Entry points are [`parse_file`] for `.reqif` documents and `.reqifz`
//! bundles, and [`parse_str`] for in-memory XML. Parsing is tolerant by
//! design: only unreadable XML, a document with no requirements container,
//! and a broken or empty bundle are fatal. Everything else degrades into
//! [`ParseDiagnostics`] warnings.

mod archive;
mod catalog;
mod extract;
mod fields;
mod locate;
mod namespace;
mod spec_object;

pub use archive::{extract_documents, ExtractedDocument};
pub use extract::{flatten_xhtml, normalize_whitespace};
pub use namespace::{NamespaceContext, KNOWN_REQIF_NAMESPACES};

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use roxmltree::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReqifError, Result, StructuralErrorKind};
use crate::model::Requirement;
use crate::quality::{ParseDiagnostics, ParseWarning};

/// Everything one parse call produces: the records in source order plus the
/// file-level diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutput {
    pub requirements: Vec<Requirement>,
    pub diagnostics: ParseDiagnostics,
}

/// Parse a `.reqif` document or `.reqifz` bundle from disk.
///
/// Bundle members are parsed independently and concatenated in archive
/// order; their diagnostics are folded together.
pub fn parse_file(path: &Path) -> Result<ParseOutput> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "reqif" => {
            let content = fs::read_to_string(path).map_err(|e| ReqifError::io(path, e))?;
            let mut output = parse_document(&content, &path.display().to_string())?;
            flag_duplicates(&mut output);
            output.diagnostics.finalize(&output.requirements);
            info!(
                path = %path.display(),
                requirements = output.requirements.len(),
                quality = output.diagnostics.quality_score,
                "parsed document"
            );
            Ok(output)
        }
        "reqifz" => {
            let members = archive::extract_documents(path)?;
            let member_count = members.len();
            let mut members = members.into_iter();
            let first = members.next().ok_or_else(|| {
                ReqifError::archive(
                    path.display().to_string(),
                    crate::error::ArchiveErrorKind::NoDocuments,
                )
            })?;

            let mut output = parse_document(&first.content, &first.member_name)?;
            for member in members {
                let parsed = parse_document(&member.content, &member.member_name)?;
                let offset = output.requirements.len();
                for mut requirement in parsed.requirements {
                    requirement.source_order += offset;
                    output.requirements.push(requirement);
                }
                output.diagnostics.absorb(parsed.diagnostics);
            }
            flag_duplicates(&mut output);
            output.diagnostics.finalize(&output.requirements);
            info!(
                path = %path.display(),
                members = member_count,
                requirements = output.requirements.len(),
                "parsed bundle"
            );
            Ok(output)
        }
        other => Err(ReqifError::structural(
            path.display().to_string(),
            StructuralErrorKind::UnsupportedExtension(format!(".{other}")),
        )),
    }
}

/// Parse in-memory ReqIF XML.
pub fn parse_str(content: &str) -> Result<ParseOutput> {
    let mut output = parse_document(content, "<memory>")?;
    flag_duplicates(&mut output);
    output.diagnostics.finalize(&output.requirements);
    Ok(output)
}

fn parse_document(content: &str, origin: &str) -> Result<ParseOutput> {
    let document = Document::parse(content)
        .map_err(|e| ReqifError::invalid_xml(origin, e.to_string()))?;
    let root = document.root_element();

    let ns = NamespaceContext::resolve(root);
    let mut diagnostics = ParseDiagnostics::new(ns.mode, ns.uri.clone());

    let definitions = catalog::build(root, &ns, &mut diagnostics.discovery);
    diagnostics.definition_count = definitions.entry_count();

    let spec_objects = locate::find_all(root, "SPEC-OBJECT", &ns, &mut diagnostics.discovery);
    if spec_objects.is_empty() && !has_requirements_container(root, &ns) {
        return Err(ReqifError::structural(
            origin,
            StructuralErrorKind::NoRequirementsContainer,
        ));
    }
    diagnostics.spec_object_count = spec_objects.len();
    debug!(
        origin,
        spec_objects = spec_objects.len(),
        definitions = diagnostics.definition_count,
        "discovered document structure"
    );

    let mut requirements = Vec::with_capacity(spec_objects.len());
    for (index, node) in spec_objects.into_iter().enumerate() {
        requirements.push(spec_object::assemble(
            node,
            index,
            &definitions,
            &ns,
            &mut diagnostics,
        ));
    }

    Ok(ParseOutput {
        requirements,
        diagnostics,
    })
}

/// A file with zero SPEC-OBJECTs is still valid ReqIF if it carries a
/// recognizable container; anything else is not requirements interchange.
fn has_requirements_container(root: roxmltree::Node, ns: &NamespaceContext) -> bool {
    if root.tag_name().name().eq_ignore_ascii_case("REQ-IF") {
        return true;
    }
    let mut scratch = crate::quality::TierCounts::default();
    ["REQ-IF-CONTENT", "SPEC-OBJECTS", "SPECIFICATIONS"]
        .iter()
        .any(|tag| locate::find_first(root, tag, ns, &mut scratch).is_some())
}

/// Record a warning for every id that appears more than once. All records
/// are kept; duplicate resolution is the comparator's policy.
fn flag_duplicates(output: &mut ParseOutput) {
    let mut seen = HashSet::new();
    let mut flagged = HashSet::new();
    for requirement in &output.requirements {
        if !seen.insert(requirement.id.clone()) && flagged.insert(requirement.id.clone()) {
            warn!(id = %requirement.id, "duplicate requirement id");
            output.diagnostics.warn(ParseWarning::DuplicateId {
                id: requirement.id.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::NamespaceMode;

    const MINIMAL: &str = r#"<REQ-IF xmlns="http://www.omg.org/spec/ReqIF/20110401/reqif.xsd">
        <ATTRIBUTE-DEFINITION-STRING IDENTIFIER="AD-1" LONG-NAME="Object Heading"/>
        <SPEC-OBJECT IDENTIFIER="REQ-1"><VALUES>
            <ATTRIBUTE-VALUE-STRING ATTRIBUTE-DEFINITION-REF="AD-1" THE-VALUE="Pump control"/>
        </VALUES></SPEC-OBJECT>
        <SPEC-OBJECT IDENTIFIER="REQ-2"><VALUES>
            <ATTRIBUTE-VALUE-STRING ATTRIBUTE-DEFINITION-REF="AD-1" THE-VALUE="Valve control"/>
        </VALUES></SPEC-OBJECT>
    </REQ-IF>"#;

    #[test]
    fn one_record_per_spec_object_in_source_order() {
        let output = parse_str(MINIMAL).unwrap();

        assert_eq!(output.requirements.len(), 2);
        assert_eq!(output.requirements[0].id, "REQ-1");
        assert_eq!(output.requirements[0].source_order, 0);
        assert_eq!(output.requirements[1].id, "REQ-2");
        assert_eq!(output.requirements[1].source_order, 1);
        assert_eq!(output.diagnostics.namespace_mode, NamespaceMode::Known);
        assert_eq!(output.diagnostics.spec_object_count, 2);
    }

    #[test]
    fn non_xml_input_is_a_structural_error() {
        let err = parse_str("definitely not xml {").unwrap_err();
        assert!(matches!(
            err,
            ReqifError::Structural {
                source: StructuralErrorKind::InvalidXml(_),
                ..
            }
        ));
    }

    #[test]
    fn xml_without_requirements_container_is_rejected() {
        let err = parse_str("<library><book/></library>").unwrap_err();
        assert!(matches!(
            err,
            ReqifError::Structural {
                source: StructuralErrorKind::NoRequirementsContainer,
                ..
            }
        ));
    }

    #[test]
    fn empty_reqif_document_parses_to_zero_records() {
        let output = parse_str("<REQ-IF/>").unwrap();
        assert!(output.requirements.is_empty());
        assert!((output.diagnostics.quality_score).abs() < f64::EPSILON);
    }

    #[test]
    fn duplicate_ids_are_flagged_but_all_records_kept() {
        let xml = r#"<REQ-IF>
            <SPEC-OBJECT IDENTIFIER="REQ-1"/>
            <SPEC-OBJECT IDENTIFIER="REQ-1"/>
        </REQ-IF>"#;
        let output = parse_str(xml).unwrap();

        assert_eq!(output.requirements.len(), 2);
        assert_eq!(
            output
                .diagnostics
                .warnings
                .iter()
                .filter(|w| matches!(w, ParseWarning::DuplicateId { id } if id == "REQ-1"))
                .count(),
            1
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = parse_file(Path::new("requirements.docx")).unwrap_err();
        assert!(matches!(
            err,
            ReqifError::Structural {
                source: StructuralErrorKind::UnsupportedExtension(_),
                ..
            }
        ));
    }
}
