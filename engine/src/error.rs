//! Typed errors for extraction, persistence and export.

use std::path::PathBuf;

use thiserror::Error;

/// An icon identifier with no entry in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no symbol for icon `{0}`")]
pub struct UnknownIconError(pub String);

/// Per-card extraction failure. Never fatal to a whole set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// An icon could not be resolved; extend the symbol table.
    #[error("unknown icon `{icon}` in {field}")]
    UnknownIcon { icon: String, field: &'static str },

    /// The card's rows do not have the structure its extractor needs.
    #[error("malformed card: {reason}")]
    MalformedCard { reason: String },
}

impl ExtractError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ExtractError::MalformedCard {
            reason: reason.into(),
        }
    }

    pub(crate) fn icon(err: UnknownIconError, field: &'static str) -> Self {
        ExtractError::UnknownIcon { icon: err.0, field }
    }
}

/// Failure while reading or writing a collection or configuration file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while writing exported text files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
