//! Built-in log schemas.
//!
//! Each supported [`LogKind`] has one immutable [`LogSchema`] describing the
//! Zeek columns it reads, the output name and semantic type of every
//! extracted field, and the column layout assumed when a file carries no
//! `#fields` header. Schemas are `'static` and never mutated; a
//! [`SchemaRegistry`] value hands them to the pipeline explicitly.

use crate::error::{Error, Result};
use crate::types::{FingerprintKind, LogKind};

/// Version tag of the plugin log layout these schemas were written against.
pub const SCHEMA_VERSION: &str = "ja4plus-zeek/1";

/// Zeek's default `#separator`.
pub const DEFAULT_SEPARATOR: char = '\t';
/// Zeek's default `#unset_field`.
pub const DEFAULT_UNSET_FIELD: &str = "-";
/// Zeek's default `#empty_field`.
pub const DEFAULT_EMPTY_FIELD: &str = "(empty)";

// ---------------------------------------------------------------------------
// Field definitions
// ---------------------------------------------------------------------------

/// Semantic type of an extracted field; drives normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Port,
    Address,
    Timestamp,
    /// Composite `addr:port` value, split into its two halves.
    Endpoint,
    Fingerprint(FingerprintKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Output name, used as CSV header and JSON key.
    pub name: &'static str,
    /// Zeek source column.
    pub column: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, column: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef { name, column, kind }
}

#[derive(Debug, PartialEq, Eq)]
pub struct LogSchema {
    pub kind: LogKind,
    pub version: &'static str,
    pub separator: char,
    pub unset_field: &'static str,
    pub empty_field: &'static str,
    /// Extracted fields, in output order.
    pub fields: &'static [FieldDef],
    /// Full column order of a headerless file. Its length is the token count
    /// every headerless data line must have.
    pub layout: &'static [&'static str],
    /// Stem used for files written in output-directory mode.
    pub file_stem: &'static str,
}

impl LogSchema {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn fingerprint_fields(&self) -> impl Iterator<Item = (&'static str, FingerprintKind)> + '_ {
        self.fields.iter().filter_map(|f| match f.kind {
            FieldKind::Fingerprint(k) => Some((f.name, k)),
            _ => None,
        })
    }

    /// Position of `column` in the headerless layout.
    pub fn layout_index(&self, column: &str) -> Option<usize> {
        self.layout.iter().position(|c| *c == column)
    }
}

// ---------------------------------------------------------------------------
// conn.log
// ---------------------------------------------------------------------------

const CONN_FIELDS: &[FieldDef] = &[
    field("ts", "ts", FieldKind::Timestamp),
    field("uid", "uid", FieldKind::Text),
    field("src_ip", "id.orig_h", FieldKind::Address),
    field("src_port", "id.orig_p", FieldKind::Port),
    field("dst_ip", "id.resp_h", FieldKind::Address),
    field("dst_port", "id.resp_p", FieldKind::Port),
    field("ja4t", "ja4t", FieldKind::Fingerprint(FingerprintKind::Ja4t)),
    field("ja4ts", "ja4ts", FieldKind::Fingerprint(FingerprintKind::Ja4ts)),
];

const CONN_LAYOUT: &[&str] = &[
    "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "proto", "service",
    "duration", "orig_bytes", "resp_bytes", "conn_state", "local_orig", "local_resp",
    "missed_bytes", "history", "orig_pkts", "orig_ip_bytes", "resp_pkts", "resp_ip_bytes",
    "tunnel_parents", "ip_proto", "community_id", "ja4t", "ja4ts",
];

pub static CONN: LogSchema = LogSchema {
    kind: LogKind::Conn,
    version: SCHEMA_VERSION,
    separator: DEFAULT_SEPARATOR,
    unset_field: DEFAULT_UNSET_FIELD,
    empty_field: DEFAULT_EMPTY_FIELD,
    fields: CONN_FIELDS,
    layout: CONN_LAYOUT,
    file_stem: "parsed_tcp_logs",
};

// ---------------------------------------------------------------------------
// ssl.log
// ---------------------------------------------------------------------------

const SSL_FIELDS: &[FieldDef] = &[
    field("ts", "ts", FieldKind::Timestamp),
    field("uid", "uid", FieldKind::Text),
    field("src_ip", "id.orig_h", FieldKind::Address),
    field("src_port", "id.orig_p", FieldKind::Port),
    field("dst_ip", "id.resp_h", FieldKind::Address),
    field("dst_port", "id.resp_p", FieldKind::Port),
    field("version", "version", FieldKind::Text),
    field("cipher", "cipher", FieldKind::Text),
    field("server_name", "server_name", FieldKind::Text),
    field("ja4", "ja4", FieldKind::Fingerprint(FingerprintKind::Ja4)),
    field("ja4s", "ja4s", FieldKind::Fingerprint(FingerprintKind::Ja4s)),
];

const SSL_LAYOUT: &[&str] = &[
    "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "version", "cipher",
    "curve", "server_name", "resumed", "last_alert", "next_protocol", "established",
    "ssl_history", "cert_chain_fps", "client_cert_chain_fps", "sni_matches_cert",
    "validation_status", "ja4", "ja4s",
];

pub static SSL: LogSchema = LogSchema {
    kind: LogKind::Ssl,
    version: SCHEMA_VERSION,
    separator: DEFAULT_SEPARATOR,
    unset_field: DEFAULT_UNSET_FIELD,
    empty_field: DEFAULT_EMPTY_FIELD,
    fields: SSL_FIELDS,
    layout: SSL_LAYOUT,
    file_stem: "parsed_ssl_logs",
};

// ---------------------------------------------------------------------------
// http.log
// ---------------------------------------------------------------------------

const HTTP_FIELDS: &[FieldDef] = &[
    field("ts", "ts", FieldKind::Timestamp),
    field("uid", "uid", FieldKind::Text),
    field("src_ip", "id.orig_h", FieldKind::Address),
    field("src_port", "id.orig_p", FieldKind::Port),
    field("dst_ip", "id.resp_h", FieldKind::Address),
    field("dst_port", "id.resp_p", FieldKind::Port),
    field("method", "method", FieldKind::Text),
    field("host", "host", FieldKind::Text),
    field("uri", "uri", FieldKind::Text),
    field("user_agent", "user_agent", FieldKind::Text),
    field("status_code", "status_code", FieldKind::Integer),
    field("ja4h", "ja4h", FieldKind::Fingerprint(FingerprintKind::Ja4h)),
];

const HTTP_LAYOUT: &[&str] = &[
    "ts", "uid", "id.orig_h", "id.orig_p", "id.resp_h", "id.resp_p", "trans_depth", "method",
    "host", "uri", "referrer", "version", "user_agent", "origin", "request_body_len",
    "response_body_len", "status_code", "status_msg", "info_code", "info_msg", "tags",
    "username", "password", "proxied", "orig_fuids", "orig_filenames", "orig_mime_types",
    "resp_fuids", "resp_filenames", "resp_mime_types", "ja4h",
];

pub static HTTP: LogSchema = LogSchema {
    kind: LogKind::Http,
    version: SCHEMA_VERSION,
    separator: DEFAULT_SEPARATOR,
    unset_field: DEFAULT_UNSET_FIELD,
    empty_field: DEFAULT_EMPTY_FIELD,
    fields: HTTP_FIELDS,
    layout: HTTP_LAYOUT,
    file_stem: "parsed_http_logs",
};

// ---------------------------------------------------------------------------
// x509.log
// ---------------------------------------------------------------------------

const X509_FIELDS: &[FieldDef] = &[
    field("ts", "ts", FieldKind::Timestamp),
    field("uid", "uid", FieldKind::Text),
    field("fuid", "fuid", FieldKind::Text),
    field("src_ip", "id.orig_h", FieldKind::Address),
    field("dst_ip", "id.resp_h", FieldKind::Address),
    field("version", "version", FieldKind::Integer),
    field("serial", "serial", FieldKind::Text),
    field("subject", "subject", FieldKind::Text),
    field("issuer", "issuer", FieldKind::Text),
    field("not_before", "validity.not_before", FieldKind::Timestamp),
    field("not_after", "validity.not_after", FieldKind::Timestamp),
    field("key_type", "key_type", FieldKind::Text),
    field("sig_alg", "sig_alg", FieldKind::Text),
    field("ja4x", "ja4x", FieldKind::Fingerprint(FingerprintKind::Ja4x)),
];

const X509_LAYOUT: &[&str] = &[
    "ts", "uid", "fuid", "id.orig_h", "id.resp_h", "version", "serial", "subject", "issuer",
    "validity.not_before", "validity.not_after", "key_type", "sig_alg", "ja4x",
];

pub static X509: LogSchema = LogSchema {
    kind: LogKind::X509,
    version: SCHEMA_VERSION,
    separator: DEFAULT_SEPARATOR,
    unset_field: DEFAULT_UNSET_FIELD,
    empty_field: DEFAULT_EMPTY_FIELD,
    fields: X509_FIELDS,
    layout: X509_LAYOUT,
    file_stem: "parsed_x509_logs",
};

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The set of schemas available to one invocation.
///
/// Built once at startup and passed by reference; there is no process-wide
/// mutable registry.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<&'static LogSchema>,
}

impl SchemaRegistry {
    pub fn builtin() -> Self {
        Self {
            schemas: vec![&CONN, &SSL, &HTTP, &X509],
        }
    }

    pub fn get(&self, kind: LogKind) -> Option<&'static LogSchema> {
        self.schemas.iter().copied().find(|s| s.kind == kind)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &'static LogSchema> + '_ {
        self.schemas.iter().copied()
    }

    /// Pick the schema for a file.
    ///
    /// `requested` is the caller's selector; `path` is the file's `#path`
    /// directive. Either may be missing, but not both, and they must agree.
    pub fn select(
        &self,
        requested: Option<LogKind>,
        path: Option<&str>,
    ) -> Result<&'static LogSchema> {
        let from_path = path.map(str::parse::<LogKind>).transpose()?;
        match (requested, from_path) {
            (Some(want), Some(found)) if want != found => Err(Error::unsupported(
                want,
                format!("file declares #path {found}"),
            )),
            (Some(kind), _) | (None, Some(kind)) => self
                .get(kind)
                .ok_or_else(|| Error::unsupported(kind, "no schema registered for this kind")),
            (None, None) => Err(Error::NoSchemaSelected),
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
