//! Tiered element discovery.
//!
//! Every structural lookup goes through [`find_all`], which tries four
//! strategies in decreasing confidence and stops at the first that yields
//! anything. The winning tier is recorded so diagnostics can report how
//! far from spec-conformant the document was.

use roxmltree::Node;

use super::namespace::NamespaceContext;
use crate::quality::{DiscoveryTier, TierCounts};

type TierFn = for<'a, 'input> fn(Node<'a, 'input>, &str, &NamespaceContext) -> Vec<Node<'a, 'input>>;

const TIERS: [(DiscoveryTier, TierFn); 4] = [
    (DiscoveryTier::Qualified, tier_qualified),
    (DiscoveryTier::Declared, tier_declared),
    (DiscoveryTier::LocalName, tier_local_name),
    (DiscoveryTier::CaseInsensitive, tier_case_insensitive),
];

/// Find all descendant elements of `scope` matching `local_name`, walking
/// the discovery tiers until one yields a non-empty result. Results keep
/// document order; the scope element itself is never a match.
pub fn find_all<'a, 'input>(
    scope: Node<'a, 'input>,
    local_name: &str,
    ns: &NamespaceContext,
    counts: &mut TierCounts,
) -> Vec<Node<'a, 'input>> {
    for (tier, lookup) in TIERS {
        let found = lookup(scope, local_name, ns);
        if !found.is_empty() {
            counts.record(tier);
            return found;
        }
    }
    Vec::new()
}

/// First match of [`find_all`], if any.
pub fn find_first<'a, 'input>(
    scope: Node<'a, 'input>,
    local_name: &str,
    ns: &NamespaceContext,
    counts: &mut TierCounts,
) -> Option<Node<'a, 'input>> {
    find_all(scope, local_name, ns, counts).into_iter().next()
}

fn descendants_of<'a, 'input>(
    scope: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    scope.descendants().skip(1).filter(Node::is_element)
}

fn tier_qualified<'a, 'input>(
    scope: Node<'a, 'input>,
    local_name: &str,
    ns: &NamespaceContext,
) -> Vec<Node<'a, 'input>> {
    let Some(uri) = ns.uri.as_deref() else {
        return Vec::new();
    };
    descendants_of(scope)
        .filter(|n| {
            n.tag_name().name() == local_name && n.tag_name().namespace() == Some(uri)
        })
        .collect()
}

fn tier_declared<'a, 'input>(
    scope: Node<'a, 'input>,
    local_name: &str,
    ns: &NamespaceContext,
) -> Vec<Node<'a, 'input>> {
    if ns.declared.is_empty() {
        return Vec::new();
    }
    descendants_of(scope)
        .filter(|n| {
            n.tag_name().name() == local_name
                && n.tag_name()
                    .namespace()
                    .is_some_and(|u| ns.declared.iter().any(|d| d == u))
        })
        .collect()
}

fn tier_local_name<'a, 'input>(
    scope: Node<'a, 'input>,
    local_name: &str,
    _ns: &NamespaceContext,
) -> Vec<Node<'a, 'input>> {
    descendants_of(scope)
        .filter(|n| n.tag_name().name() == local_name)
        .collect()
}

fn tier_case_insensitive<'a, 'input>(
    scope: Node<'a, 'input>,
    local_name: &str,
    _ns: &NamespaceContext,
) -> Vec<Node<'a, 'input>> {
    descendants_of(scope)
        .filter(|n| n.tag_name().name().eq_ignore_ascii_case(local_name))
        .collect()
}

/// Case-insensitive attribute lookup by local name. Vendor exports disagree
/// on attribute casing (`IDENTIFIER`, `identifier`, `Identifier`).
pub fn attr_ci<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name().eq_ignore_ascii_case(name))
        .map(|a| a.value())
}

/// First present attribute among several case-insensitive candidates.
pub fn attr_any<'a>(node: Node<'a, '_>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| attr_ci(node, name))
}
