//! Record aggregator — order-preserving filtering into a [`RecordSet`].
//!
//! Records arrive in file order and leave in file order. Filtering only
//! selects; it never reorders, merges or deduplicates. Exact-duplicate
//! removal exists as a separate, opt-in pass ([`dedup_exact`]).

use std::collections::HashSet;
use std::net::IpAddr;

use crate::normalizer::parse_endpoint;
use crate::schema::LogSchema;
use crate::types::{FingerprintKind, NormalizedRecord, Value};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Connection selector for the stream filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamId {
    /// Zeek connection uid, e.g. `CHhAvVGS1DHFjwGM9`.
    Uid(String),
    /// Either side of the connection.
    Endpoint { addr: IpAddr, port: u16 },
}

impl StreamId {
    /// `addr:port` parses as an endpoint; anything else is taken as a uid.
    pub fn parse(raw: &str) -> Self {
        match parse_endpoint(raw) {
            Some((addr, port)) => StreamId::Endpoint { addr, port },
            None => StreamId::Uid(raw.to_string()),
        }
    }

    fn matches(&self, record: &NormalizedRecord) -> bool {
        match self {
            StreamId::Uid(uid) => {
                matches!(record.get("uid"), Some(Value::Text(v)) if v == uid)
            }
            StreamId::Endpoint { addr, port } => [("src_ip", "src_port"), ("dst_ip", "dst_port")]
                .iter()
                .any(|(a, p)| {
                    matches!(record.get(a), Some(Value::Address(x)) if x == addr)
                        && matches!(
                            record.get(p),
                            Some(Value::Integer(n)) if *n == i64::from(*port)
                        )
                }),
        }
    }
}

/// Selection applied by the aggregator. The default keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep records whose field of this type is present (valid or malformed).
    pub fingerprint: Option<FingerprintKind>,
    pub stream: Option<StreamId>,
    /// Keep records with at least one present fingerprint field.
    pub require_fingerprint: bool,
}

impl RecordFilter {
    pub fn is_pass_through(&self) -> bool {
        *self == RecordFilter::default()
    }

    pub fn matches(&self, schema: &LogSchema, record: &NormalizedRecord) -> bool {
        let present = |name: &str| record.get(name).is_some_and(|v| !v.is_absent());

        if let Some(kind) = self.fingerprint {
            let hit = schema
                .fingerprint_fields()
                .any(|(name, k)| k == kind && present(name));
            if !hit {
                return false;
            }
        }
        if self.require_fingerprint && !schema.fingerprint_fields().any(|(name, _)| present(name)) {
            return false;
        }
        if let Some(stream) = &self.stream {
            if !stream.matches(record) {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// RecordSet / Aggregator
// ---------------------------------------------------------------------------

/// The ordered output of one run, ready for serialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    schema: &'static LogSchema,
    records: Vec<NormalizedRecord>,
}

impl RecordSet {
    pub fn new(schema: &'static LogSchema, records: Vec<NormalizedRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &'static LogSchema {
        self.schema
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<NormalizedRecord> {
        self.records
    }
}

/// Collects normalised records for one file, applying a [`RecordFilter`].
pub struct Aggregator {
    schema: &'static LogSchema,
    filter: RecordFilter,
    records: Vec<NormalizedRecord>,
    filtered_out: usize,
}

impl Aggregator {
    pub fn new(schema: &'static LogSchema, filter: RecordFilter) -> Self {
        Self {
            schema,
            filter,
            records: Vec::new(),
            filtered_out: 0,
        }
    }

    /// Offer a record. Returns whether it was kept.
    pub fn push(&mut self, record: NormalizedRecord) -> bool {
        if self.filter.matches(self.schema, &record) {
            self.records.push(record);
            true
        } else {
            self.filtered_out += 1;
            false
        }
    }

    pub fn filtered_out(&self) -> usize {
        self.filtered_out
    }

    pub fn finish(self) -> RecordSet {
        RecordSet::new(self.schema, self.records)
    }
}

/// Drop records whose field values repeat an earlier record exactly,
/// ignoring line numbers. Keeps first occurrences in order; returns the
/// number removed.
pub fn dedup_exact(set: RecordSet) -> (RecordSet, usize) {
    let schema = set.schema;
    let before = set.records.len();
    let mut seen = HashSet::new();
    let records: Vec<_> = set
        .records
        .into_iter()
        .filter(|r| {
            let key: Vec<String> = r.fields.iter().map(|(_, v)| dedup_key(v)).collect();
            seen.insert(key)
        })
        .collect();
    let removed = before - records.len();
    (RecordSet::new(schema, records), removed)
}

// Tag each value with its variant so `Absent` and `Text("")` stay distinct.
fn dedup_key(value: &Value) -> String {
    let tag = match value {
        Value::Absent => 'a',
        Value::Text(_) => 's',
        Value::Integer(_) => 'i',
        Value::Address(_) => 'p',
        Value::Timestamp(_) => 't',
        Value::Endpoint { .. } => 'e',
        Value::Fingerprint(_) => 'f',
        Value::Unnormalized { .. } => 'u',
    };
    format!("{tag}:{}", value.display_string())
}
