//! Core types for ja4log-core.
//!
//! This module defines the data that flows through every pipeline stage: the
//! [`LogKind`] discriminant, the [`FingerprintKind`] family, the
//! [`RawLogLine`] read from disk, and the typed [`NormalizedRecord`] that the
//! serializer renders.

use std::net::IpAddr;

use chrono::{DateTime, Utc};

use crate::error::Error;

// ---------------------------------------------------------------------------
// Log kinds
// ---------------------------------------------------------------------------

/// Which Zeek log a file holds. One built-in schema exists per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// `conn.log` with JA4T / JA4TS columns.
    Conn,
    /// `ssl.log` with JA4 / JA4S columns.
    Ssl,
    /// `http.log` with the JA4H column.
    Http,
    /// `x509.log` with the JA4X column.
    X509,
}

/// Names and aliases accepted for each log kind (CLI `--kind`, Zeek `#path`).
static LOG_KIND_ALIASES: phf::Map<&'static str, LogKind> = phf::phf_map! {
    "conn" => LogKind::Conn,
    "tcp" => LogKind::Conn,
    "ja4t" => LogKind::Conn,
    "ja4ts" => LogKind::Conn,
    "ssl" => LogKind::Ssl,
    "tls" => LogKind::Ssl,
    "ja4" => LogKind::Ssl,
    "ja4s" => LogKind::Ssl,
    "http" => LogKind::Http,
    "ja4h" => LogKind::Http,
    "x509" => LogKind::X509,
    "cert" => LogKind::X509,
    "ja4x" => LogKind::X509,
};

impl LogKind {
    pub const ALL: [LogKind; 4] = [LogKind::Conn, LogKind::Ssl, LogKind::Http, LogKind::X509];

    /// The Zeek `#path` value this kind corresponds to.
    pub fn zeek_path(self) -> &'static str {
        match self {
            LogKind::Conn => "conn",
            LogKind::Ssl => "ssl",
            LogKind::Http => "http",
            LogKind::X509 => "x509",
        }
    }

    /// Resolve a name or alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<LogKind> {
        LOG_KIND_ALIASES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
    }
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.zeek_path())
    }
}

impl std::str::FromStr for LogKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogKind::from_name(s).ok_or_else(|| Error::UnknownLogKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Fingerprint kinds
// ---------------------------------------------------------------------------

/// A member of the JA4+ fingerprint family carried by the supported logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerprintKind {
    /// TLS client.
    Ja4,
    /// TLS server response.
    Ja4s,
    /// HTTP client.
    Ja4h,
    /// X.509 certificate.
    Ja4x,
    /// TCP client SYN.
    Ja4t,
    /// TCP server SYN-ACK.
    Ja4ts,
}

impl FingerprintKind {
    pub const ALL: [FingerprintKind; 6] = [
        FingerprintKind::Ja4,
        FingerprintKind::Ja4s,
        FingerprintKind::Ja4h,
        FingerprintKind::Ja4x,
        FingerprintKind::Ja4t,
        FingerprintKind::Ja4ts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FingerprintKind::Ja4 => "ja4",
            FingerprintKind::Ja4s => "ja4s",
            FingerprintKind::Ja4h => "ja4h",
            FingerprintKind::Ja4x => "ja4x",
            FingerprintKind::Ja4t => "ja4t",
            FingerprintKind::Ja4ts => "ja4ts",
        }
    }
}

impl std::fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FingerprintKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FingerprintKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| format!("unknown fingerprint type {s:?}"))
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// One data line read from an input log, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLogLine {
    pub number: usize,
    pub text: String,
}

impl RawLogLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalised values
// ---------------------------------------------------------------------------

/// A typed field value after normalisation.
///
/// `Absent` is the unset sentinel; `Unnormalized` keeps the raw token of a
/// value that failed coercion or shape validation. The two are never
/// confused with each other or with a valid value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Absent,
    Text(String),
    Integer(i64),
    Address(IpAddr),
    Timestamp(DateTime<Utc>),
    Endpoint { addr: IpAddr, port: u16 },
    Fingerprint(String),
    Unnormalized { raw: String, reason: String },
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_unnormalized(&self) -> bool {
        matches!(self, Value::Unnormalized { .. })
    }

    /// String form used for CSV cells and stream matching. Absent renders as
    /// the empty string.
    pub fn display_string(&self) -> String {
        match self {
            Value::Absent => String::new(),
            Value::Text(s) | Value::Fingerprint(s) => s.clone(),
            Value::Integer(n) => n.to_string(),
            Value::Address(a) => a.to_string(),
            Value::Timestamp(ts) => ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            Value::Endpoint { addr, port } => crate::normalizer::format_endpoint(*addr, *port),
            Value::Unnormalized { raw, .. } => raw.clone(),
        }
    }
}

/// A field that fell back to its raw string during normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue<'a> {
    pub field: &'a str,
    pub reason: &'a str,
}

/// The canonical, typed representation of one log line.
///
/// `fields` holds exactly the schema's field names, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Source line number in the input file.
    pub line: usize,
    pub fields: Vec<(&'static str, Value)>,
}

impl NormalizedRecord {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    /// Fields that failed normalisation, in schema order.
    pub fn issues(&self) -> Vec<FieldIssue<'_>> {
        self.fields
            .iter()
            .filter_map(|(field, value)| match value {
                Value::Unnormalized { reason, .. } => Some(FieldIssue { field, reason }),
                _ => None,
            })
            .collect()
    }

    pub fn is_flagged(&self) -> bool {
        self.fields.iter().any(|(_, v)| v.is_unnormalized())
    }
}
