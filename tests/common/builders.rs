//! Test builders for Zeek ASCII logs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::{Path, PathBuf};

use ja4log_core::schema::LogSchema;
use ja4log_core::{LogKind, SchemaRegistry};

use super::fixtures::{JA4TS_SERVER, JA4T_LINUX};

// ---------------------------------------------------------------------------
// ZeekLogBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for Zeek log text.
///
/// Rows start as all-unset (`-`) across the column list and only the named
/// columns are filled in.
///
/// # Example
///
/// ```rust
/// let text = ZeekLogBuilder::new(LogKind::Ssl)
///     .row(&[("uid", "CAbc1"), ("ja4", JA4_CHROME)])
///     .build();
/// ```
pub struct ZeekLogBuilder {
    header: bool,
    path: Option<String>,
    separator: char,
    columns: Vec<String>,
    lines: Vec<String>,
}

impl ZeekLogBuilder {
    pub fn new(kind: LogKind) -> Self {
        let schema = schema_for(kind);
        Self {
            header: true,
            path: Some(kind.zeek_path().to_string()),
            separator: '\t',
            columns: schema.layout.iter().map(|c| c.to_string()).collect(),
            lines: Vec::new(),
        }
    }

    /// Omit every `#` directive; rows use the fixed layout.
    pub fn headerless(mut self) -> Self {
        self.header = false;
        self
    }

    /// Override (or drop, with `None`) the `#path` directive.
    pub fn path(mut self, path: Option<&str>) -> Self {
        self.path = path.map(str::to_string);
        self
    }

    pub fn separator(mut self, sep: char) -> Self {
        self.separator = sep;
        self
    }

    /// Replace the `#fields` column list.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a data row; columns not named stay unset.
    pub fn row(mut self, values: &[(&str, &str)]) -> Self {
        let mut tokens: Vec<String> = vec!["-".to_string(); self.columns.len()];
        for (column, value) in values {
            let idx = self
                .columns
                .iter()
                .position(|c| c == column)
                .unwrap_or_else(|| panic!("column {column:?} not in builder columns"));
            tokens[idx] = value.to_string();
        }
        self.lines.push(tokens.join(self.separator.to_string().as_str()));
        self
    }

    /// Add a line verbatim.
    pub fn raw_line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn build(self) -> String {
        let sep = self.separator.to_string();
        let mut out = String::new();
        if self.header {
            out.push_str(&format!("#separator \\x{:02x}\n", self.separator as u32));
            for (name, value) in [
                ("set_separator", ","),
                ("empty_field", "(empty)"),
                ("unset_field", "-"),
            ] {
                out.push_str(&format!("#{name}{sep}{value}\n"));
            }
            if let Some(path) = &self.path {
                out.push_str(&format!("#path{sep}{path}\n"));
            }
            out.push_str(&format!("#open{sep}2024-01-15-10-00-00\n"));
            out.push_str(&format!("#fields{sep}{}\n", self.columns.join(sep.as_str())));
            let types = vec!["string"; self.columns.len()].join(sep.as_str());
            out.push_str(&format!("#types{sep}{types}\n"));
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        if self.header {
            out.push_str(&format!("#close{sep}2024-01-15-11-00-00\n"));
        }
        out
    }

    /// Build and write to `dir/name`, returning the full path.
    pub fn write_to(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).expect("write fixture log");
        path
    }
}

pub fn schema_for(kind: LogKind) -> &'static LogSchema {
    SchemaRegistry::builtin()
        .get(kind)
        .unwrap_or_else(|| panic!("no builtin schema for {kind}"))
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// Build a conn log of `n` rows, every third one without a JA4T value.
pub fn conn_corpus(n: usize) -> String {
    (0..n)
        .fold(ZeekLogBuilder::new(LogKind::Conn), |b, i| {
            let ts = format!("{}.{:06}", 1_700_000_000 + i, i % 1_000_000);
            let uid = format!("C{i:08}");
            let port = (40_000 + i % 20_000).to_string();
            let ja4t = if i % 3 == 0 { "-" } else { JA4T_LINUX };
            b.row(&[
                ("ts", ts.as_str()),
                ("uid", uid.as_str()),
                ("id.orig_h", "192.168.1.10"),
                ("id.orig_p", port.as_str()),
                ("id.resp_h", "93.184.216.34"),
                ("id.resp_p", "443"),
                ("ja4t", ja4t),
                ("ja4ts", JA4TS_SERVER),
            ])
        })
        .build()
}
