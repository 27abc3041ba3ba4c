//! Schema mapper — associates token positions with schema field names.
//!
//! [`ColumnMap::resolve`] runs once per file and fixes the token index of
//! every schema field, either by name from the `#fields` header or from the
//! schema's headerless layout. [`ColumnMap::map`] then runs once per line.

use crate::error::{Error, Result};
use crate::header::ZeekHeader;
use crate::schema::LogSchema;

// ---------------------------------------------------------------------------
// FieldMap
// ---------------------------------------------------------------------------

/// Raw values of one line, keyed by schema field name in schema order.
///
/// `None` is the absent marker (the unset sentinel). It is distinct from
/// `Some("")`, which is what the empty sentinel maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(&'static str, Option<String>)>,
}

impl FieldMap {
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ColumnMap
// ---------------------------------------------------------------------------

/// Per-file resolution of schema fields to token positions.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    schema: &'static LogSchema,
    indices: Vec<usize>,
    width: usize,
    separator: char,
    unset_field: String,
    empty_field: String,
}

impl ColumnMap {
    /// Resolve `schema` against the file's header.
    ///
    /// Fails with [`Error::UnsupportedSchema`] when the header's `#fields`
    /// lack a column the schema reads, rather than guessing positions.
    pub fn resolve(schema: &'static LogSchema, header: &ZeekHeader) -> Result<Self> {
        let (indices, width) = match &header.fields {
            Some(columns) => {
                let indices = schema
                    .fields
                    .iter()
                    .map(|f| {
                        columns.iter().position(|c| c == f.column).ok_or_else(|| {
                            Error::unsupported(
                                schema.kind,
                                format!(
                                    "#fields has no {:?} column (required by {})",
                                    f.column, schema.version
                                ),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                (indices, columns.len())
            }
            None => {
                let indices = schema
                    .fields
                    .iter()
                    .map(|f| {
                        schema.layout_index(f.column).ok_or_else(|| {
                            Error::unsupported(
                                schema.kind,
                                format!("layout has no {:?} column", f.column),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                (indices, schema.layout.len())
            }
        };

        tracing::debug!(
            kind = %schema.kind,
            width,
            from_header = header.fields.is_some(),
            "resolved column map"
        );

        Ok(Self {
            schema,
            indices,
            width,
            separator: header.separator.unwrap_or(schema.separator),
            unset_field: header
                .unset_field
                .clone()
                .unwrap_or_else(|| schema.unset_field.to_string()),
            empty_field: header
                .empty_field
                .clone()
                .unwrap_or_else(|| schema.empty_field.to_string()),
        })
    }

    pub fn schema(&self) -> &'static LogSchema {
        self.schema
    }

    /// Number of tokens every data line must have.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Zip schema field names to tokens.
    ///
    /// Callers are expected to have checked the width already; a mismatch
    /// here is reported as a structural error.
    pub fn map(&self, tokens: &[String]) -> Result<FieldMap> {
        if tokens.len() != self.width {
            return Err(Error::FieldCountMismatch {
                expected: self.width,
                found: tokens.len(),
            });
        }

        let entries = self
            .schema
            .fields
            .iter()
            .zip(&self.indices)
            .map(|(f, &idx)| (f.name, self.classify(&tokens[idx])))
            .collect();
        Ok(FieldMap { entries })
    }

    fn classify(&self, token: &str) -> Option<String> {
        if token == self.unset_field {
            None
        } else if token == self.empty_field {
            Some(String::new())
        } else {
            Some(token.to_string())
        }
    }
}
