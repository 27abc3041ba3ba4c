//! ja4log-feeds — log sources for ja4log.
//!
//! Each source reads a whole Zeek ASCII log, separates the `#` header
//! directives from the data lines, and hands both to the core pipeline as a
//! [`LogInput`].

pub mod file;
pub mod header;
pub mod stdin;

use std::io::BufRead;
use std::path::PathBuf;

use ja4log_core::{RawLogLine, ZeekHeader};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} line {line}: bad header directive {directive:?}")]
    BadDirective {
        origin: String,
        line: usize,
        directive: String,
    },
}

/// A fully read log: header directives plus numbered data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInput {
    /// Human-readable origin (file path or `<stdin>`) for messages.
    pub origin: String,
    pub header: ZeekHeader,
    pub lines: Vec<RawLogLine>,
}

/// Read every line from `reader`.
///
/// Directive lines before the first data line populate the header; later
/// ones (a trailing `#close`, or a second header from concatenated logs) are
/// ignored. Empty lines are skipped; any other line, even one made only of
/// separators, is kept for the width check. Invalid UTF-8 is replaced lossily.
pub fn read_log<R: BufRead>(
    mut reader: R,
    origin: impl Into<String>,
) -> Result<LogInput, FeedError> {
    let origin = origin.into();
    let mut header = ZeekHeader::default();
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).map_err(|source| FeedError::Read {
            origin: origin.clone(),
            source,
        })?;
        if n == 0 {
            break;
        }
        number += 1;

        let text = String::from_utf8_lossy(&buf);
        let text = text.trim_end_matches(|c: char| c == '\r' || c == '\n');
        if text.is_empty() {
            continue;
        }

        if text.starts_with('#') {
            if lines.is_empty() {
                header::apply_directive(&mut header, text).map_err(|directive| {
                    FeedError::BadDirective {
                        origin: origin.clone(),
                        line: number,
                        directive,
                    }
                })?;
            } else {
                tracing::debug!(line = number, directive = text, "ignoring trailing directive");
            }
            continue;
        }

        lines.push(RawLogLine::new(number, text));
    }

    tracing::debug!(%origin, data_lines = lines.len(), path = ?header.path, "log read");
    Ok(LogInput {
        origin,
        header,
        lines,
    })
}
