//! Structural error type for the extraction pipeline.
//!
//! Only errors that abort a run live here. Line-level problems (wrong token
//! count) and field-level problems (a value that fails coercion) are counted
//! in [`RunSummary`](crate::pipeline::RunSummary) and never surface as `Err`.

use std::path::PathBuf;

use crate::types::LogKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported {kind} schema: {reason}")]
    UnsupportedSchema { kind: LogKind, reason: String },

    #[error("unknown log kind {0:?} (expected conn, ssl, http or x509)")]
    UnknownLogKind(String),

    /// Neither a requested kind nor a `#path` directive names the schema.
    #[error("no log kind selected and the input has no #path directive")]
    NoSchemaSelected,

    /// The mapper was handed a token sequence of the wrong width. The pipeline
    /// checks widths before mapping, so this indicates a caller bug.
    #[error("field count mismatch: expected {expected} tokens, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("output directory {0} does not exist")]
    OutputDirMissing(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unsupported(kind: LogKind, reason: impl Into<String>) -> Self {
        Error::UnsupportedSchema {
            kind,
            reason: reason.into(),
        }
    }
}
