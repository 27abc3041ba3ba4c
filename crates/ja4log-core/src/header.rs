//! Zeek ASCII log header — the `#`-prefixed directives at the top of a file.
//!
//! The feeds crate fills this in while reading; the pipeline only consumes
//! it. Every directive is optional: a headerless file falls back to the
//! schema's built-in separator, sentinels and column layout.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZeekHeader {
    /// `#separator`, already decoded from its `\xHH` form.
    pub separator: Option<char>,
    pub set_separator: Option<String>,
    pub empty_field: Option<String>,
    pub unset_field: Option<String>,
    /// `#path`, e.g. `conn`.
    pub path: Option<String>,
    pub open: Option<String>,
    /// `#fields` column names, in file order.
    pub fields: Option<Vec<String>>,
    /// `#types`, parallel to `fields`.
    pub types: Option<Vec<String>>,
}

impl ZeekHeader {
    pub fn is_empty(&self) -> bool {
        *self == ZeekHeader::default()
    }
}
