//! Namespace resolution.
//!
//! Real-world ReqIF arrives with the registered OMG namespace, a vendor
//! mutation of it, or none at all. Resolution tries an exact match against
//! the known URIs, then a heuristic scan of root-level declarations, and
//! finally records the absence. It never fails.

use roxmltree::Node;
use tracing::debug;

use crate::quality::NamespaceMode;

/// Registered ReqIF namespace URIs, exact-match tier.
pub const KNOWN_REQIF_NAMESPACES: &[&str] = &[
    "http://www.omg.org/spec/ReqIF/20110401/reqif.xsd",
    "http://www.omg.org/spec/ReqIF/20110402/reqif.xsd",
    "http://www.omg.org/ReqIF",
];

/// Resolved namespace state for one document, threaded through element
/// discovery.
#[derive(Debug, Clone)]
pub struct NamespaceContext {
    /// The resolved ReqIF namespace URI, `None` when the document has no
    /// recognizable namespace.
    pub uri: Option<String>,
    /// Which resolution tier produced `uri`.
    pub mode: NamespaceMode,
    /// Every namespace URI declared on the root element, for the
    /// declared-namespace discovery tier.
    pub declared: Vec<String>,
}

impl NamespaceContext {
    /// Resolve the namespace mode for a document root.
    #[must_use]
    pub fn resolve(root: Node) -> Self {
        let declared: Vec<String> = root
            .namespaces()
            .map(|ns| ns.uri().to_string())
            .collect();

        // Exact match: the root's own namespace or any root declaration.
        let root_ns = root.tag_name().namespace();
        let known = root_ns
            .filter(|uri| KNOWN_REQIF_NAMESPACES.contains(uri))
            .map(str::to_string)
            .or_else(|| {
                declared
                    .iter()
                    .find(|uri| KNOWN_REQIF_NAMESPACES.contains(&uri.as_str()))
                    .cloned()
            });
        if let Some(uri) = known {
            debug!(uri = %uri, "resolved known ReqIF namespace");
            return Self {
                uri: Some(uri),
                mode: NamespaceMode::Known,
                declared,
            };
        }

        // Heuristic: any root-level declaration carrying a ReqIF-like token,
        // preferring the root element's own namespace.
        let heuristic = root_ns
            .filter(|uri| uri.to_ascii_lowercase().contains("reqif"))
            .map(str::to_string)
            .or_else(|| {
                declared
                    .iter()
                    .find(|uri| uri.to_ascii_lowercase().contains("reqif"))
                    .cloned()
            });
        if let Some(uri) = heuristic {
            debug!(uri = %uri, "resolved ReqIF-like namespace heuristically");
            return Self {
                uri: Some(uri),
                mode: NamespaceMode::Heuristic,
                declared,
            };
        }

        debug!("document declares no recognizable ReqIF namespace");
        Self {
            uri: None,
            mode: NamespaceMode::Absent,
            declared,
        }
    }
}
