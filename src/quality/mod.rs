//! Parse diagnostics and quality scoring.

mod diagnostics;
pub mod scorer;

pub use diagnostics::{DiscoveryTier, NamespaceMode, ParseDiagnostics, ParseWarning, TierCounts};
