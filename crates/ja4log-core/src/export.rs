//! Serializer — renders a [`RecordSet`] as CSV or JSON.
//!
//! The whole document is rendered in memory first and written once, so an
//! interrupted run never leaves a truncated CSV or JSON file behind. File
//! targets are written through a temporary file in the destination directory
//! and renamed into place.
//!
//! | Value | CSV cell | JSON |
//! |-------|----------|------|
//! | absent | empty | `null` |
//! | integer / port | digits | number |
//! | timestamp | RFC 3339 or epoch | string or number |
//! | unnormalized | raw token | string |

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Number};

use crate::aggregator::RecordSet;
use crate::error::{Error, Result};
use crate::types::{NormalizedRecord, Value};

/// Extra column/key added in verbose mode listing fields that fell back to raw.
pub const ISSUES_FIELD: &str = "_issues";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format {other:?} (expected csv or json)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampStyle {
    /// RFC 3339 with microseconds, e.g. `2023-11-14T22:13:20.123456Z`.
    #[default]
    Iso8601,
    /// Zeek's `seconds.micros` form; a number in JSON.
    Epoch,
}

impl std::str::FromStr for TimestampStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iso8601" | "iso" => Ok(TimestampStyle::Iso8601),
            "epoch" => Ok(TimestampStyle::Epoch),
            other => Err(format!("unknown timestamp style {other:?} (expected iso8601 or epoch)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub timestamps: TimestampStyle,
    pub pretty_json: bool,
    /// Append the [`ISSUES_FIELD`] column/key.
    pub annotate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timestamps: TimestampStyle::Iso8601,
            pretty_json: true,
            annotate: false,
        }
    }
}

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Path(PathBuf),
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the full record set into a byte buffer.
pub fn render(set: &RecordSet, format: OutputFormat, opts: &RenderOptions) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => render_csv(set, opts),
        OutputFormat::Json => render_json(set, opts),
    }
}

fn render_csv(set: &RecordSet, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header: Vec<&str> = set.schema().field_names().collect();
    if opts.annotate {
        header.push(ISSUES_FIELD);
    }
    wtr.write_record(&header)?;

    for record in set.records() {
        let mut row: Vec<String> = record
            .fields
            .iter()
            .map(|(_, v)| csv_cell(v, opts.timestamps))
            .collect();
        if opts.annotate {
            row.push(issues_text(record).unwrap_or_default());
        }
        wtr.write_record(&row)?;
    }

    wtr.into_inner()
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
}

fn render_json(set: &RecordSet, opts: &RenderOptions) -> Result<Vec<u8>> {
    let array: Vec<serde_json::Value> = set
        .records()
        .iter()
        .map(|record| {
            let mut obj = Map::new();
            for (name, value) in &record.fields {
                obj.insert((*name).to_string(), json_value(value, opts.timestamps));
            }
            if opts.annotate {
                let issues = issues_text(record)
                    .map(serde_json::Value::String)
                    .unwrap_or(serde_json::Value::Null);
                obj.insert(ISSUES_FIELD.to_string(), issues);
            }
            serde_json::Value::Object(obj)
        })
        .collect();

    let mut out = if opts.pretty_json {
        serde_json::to_vec_pretty(&array)?
    } else {
        serde_json::to_vec(&array)?
    };
    out.push(b'\n');
    Ok(out)
}

/// The CSV cell for a value. Absent renders as an empty cell.
pub fn csv_cell(value: &Value, timestamps: TimestampStyle) -> String {
    match (value, timestamps) {
        (Value::Timestamp(ts), TimestampStyle::Epoch) => epoch_string(ts),
        _ => value.display_string(),
    }
}

/// The JSON value for a field. Absent renders as `null`.
pub fn json_value(value: &Value, timestamps: TimestampStyle) -> serde_json::Value {
    use serde_json::Value as J;
    match value {
        Value::Absent => J::Null,
        Value::Integer(n) => J::Number(Number::from(*n)),
        Value::Timestamp(ts) => match timestamps {
            TimestampStyle::Iso8601 => J::String(ts.to_rfc3339_opts(SecondsFormat::Micros, true)),
            TimestampStyle::Epoch => epoch_string(ts)
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(J::Number)
                .unwrap_or_else(|| J::String(epoch_string(ts))),
        },
        other => J::String(other.display_string()),
    }
}

fn epoch_string(ts: &DateTime<Utc>) -> String {
    format!("{}.{:06}", ts.timestamp(), ts.timestamp_subsec_micros())
}

fn issues_text(record: &NormalizedRecord) -> Option<String> {
    let issues = record.issues();
    if issues.is_empty() {
        return None;
    }
    Some(
        issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.reason))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Render and write the record set to `target` in one go.
pub fn write(
    set: &RecordSet,
    format: OutputFormat,
    target: &OutputTarget,
    opts: &RenderOptions,
) -> Result<()> {
    let bytes = render(set, format, opts)?;
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
        OutputTarget::Path(path) => write_atomic(path, &bytes)?,
    }
    tracing::debug!(?target, bytes = bytes.len(), ?format, "output written");
    Ok(())
}

/// Write `bytes` to `path` via a temporary file in the same directory.
///
/// The parent directory must already exist.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(Error::OutputDirMissing(parent.to_path_buf()));
    }

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
