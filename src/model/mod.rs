//! Canonical data model for parsed ReqIF content.
//!
//! Heterogeneous authoring tools produce structurally divergent ReqIF;
//! everything the parser ingests is normalized into the types here so the
//! comparator and downstream consumers never see vendor variance.

mod catalog;
mod requirement;
mod value;

pub use catalog::{DefinitionCatalog, DefinitionEntry};
pub use requirement::Requirement;
pub use value::{CanonicalValue, ValueType};
