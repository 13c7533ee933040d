//! **Tolerant ReqIF parsing and structural comparison.**
//!
//! `reqif-tools` ingests ReqIF (Requirements Interchange Format) documents
//! and `.reqifz` bundles as real authoring tools emit them: wrong or missing
//! namespaces, vendor tag casing, malformed typed literals, attributes with
//! no declared definition. Everything recoverable is recovered; what the
//! parser had to guess at is reported in per-file diagnostics instead of
//! failing the parse.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The canonical [`Requirement`] record, the
//!   [`DefinitionCatalog`] of per-document reference data, and the
//!   [`CanonicalValue`] attribute representation.
//! - **[`parsers`]**: Tolerant parsing. [`parse_file`] handles `.reqif`
//!   documents and `.reqifz` bundles; [`parse_str`] handles in-memory XML.
//!   Element discovery degrades through four namespace tiers and the tier
//!   used is recorded in the diagnostics.
//! - **[`diff`]**: The [`DiffEngine`], a pure id-based structural
//!   comparison of two parsed requirement sets.
//! - **[`quality`]**: [`ParseDiagnostics`] accumulated during a parse, plus
//!   the composite quality score over the recovered records.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use reqif_tools::{parse_file, compare};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let baseline = parse_file(Path::new("baseline.reqif"))?;
//!     let revised = parse_file(Path::new("revised.reqif"))?;
//!
//!     let result = compare(&baseline.requirements, &revised.requirements);
//!     println!(
//!         "{} added, {} deleted, {} modified",
//!         result.summary.added, result.summary.deleted, result.summary.modified
//!     );
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]
#![allow(
    // usize↔f64 casts in statistics are bounded in practice
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cli;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod quality;

pub use diff::{compare, DiffEngine, DiffResult};
pub use error::{ReqifError, Result};
pub use model::{CanonicalValue, DefinitionCatalog, Requirement, ValueType};
pub use parsers::{parse_file, parse_str, ParseOutput};
pub use quality::{NamespaceMode, ParseDiagnostics, ParseWarning};
