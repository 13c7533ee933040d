//! Unified error types for reqif-tools.
//!
//! Only two error categories are fatal: a document that cannot be read as
//! XML at all, and an invalid or empty bundle archive. Everything else the
//! parser encounters on vendor-variant input degrades into warnings carried
//! by [`crate::quality::ParseDiagnostics`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reqif-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReqifError {
    /// Document is unrecognizable as parseable ReqIF input.
    #[error("Structural error: {context}")]
    Structural {
        context: String,
        #[source]
        source: StructuralErrorKind,
    },

    /// Bundle archive is invalid or contains no eligible documents.
    #[error("Archive error: {context}")]
    Archive {
        context: String,
        #[source]
        source: ArchiveErrorKind,
    },

    /// IO errors with path context.
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific structural error kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StructuralErrorKind {
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    #[error(
        "No recognizable requirements container (expected REQ-IF/SPEC-OBJECTS or SPEC-OBJECT elements)"
    )]
    NoRequirementsContainer,

    #[error("Unsupported file extension: {0} (expected .reqif or .reqifz)")]
    UnsupportedExtension(String),
}

/// Specific archive error kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArchiveErrorKind {
    #[error("Not a valid ZIP archive: {0}")]
    InvalidArchive(String),

    #[error("Archive contains no .reqif documents")]
    NoDocuments,

    #[error("Failed to read archive member '{member}': {message}")]
    MemberRead { member: String, message: String },
}

/// Convenient Result type for reqif-tools operations.
pub type Result<T> = std::result::Result<T, ReqifError>;

impl ReqifError {
    /// Create a structural error with context.
    pub fn structural(context: impl Into<String>, source: StructuralErrorKind) -> Self {
        Self::Structural {
            context: context.into(),
            source,
        }
    }

    /// Create a structural error for unparseable XML.
    pub fn invalid_xml(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::structural(context, StructuralErrorKind::InvalidXml(detail.into()))
    }

    /// Create an archive error with context.
    pub fn archive(context: impl Into<String>, source: ArchiveErrorKind) -> Self {
        Self::Archive {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

impl From<std::io::Error> for ReqifError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
