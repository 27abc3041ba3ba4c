//! Normalizer — coerces a [`FieldMap`] into a typed [`NormalizedRecord`].
//!
//! Coercion is driven by each field's [`FieldKind`]. A value that fails
//! coercion or fingerprint validation is kept verbatim as
//! [`Value::Unnormalized`] with a reason; nothing is dropped. The function is
//! pure: the same input always yields the same record.

use std::net::{IpAddr, SocketAddr};

use chrono::{DateTime, Utc};

use crate::fingerprint;
use crate::mapper::FieldMap;
use crate::schema::{FieldKind, LogSchema};
use crate::types::{NormalizedRecord, Value};

/// Normalise one mapped line. `line` is the source line number.
pub fn normalize(schema: &LogSchema, line: usize, fields: &FieldMap) -> NormalizedRecord {
    let fields = schema
        .fields
        .iter()
        .map(|def| {
            let raw = fields.get(def.name).flatten();
            let value = normalize_value(def.kind, raw);
            if let Value::Unnormalized { reason, .. } = &value {
                tracing::debug!(field = def.name, line, %reason, "field kept as raw string");
            }
            (def.name, value)
        })
        .collect();

    NormalizedRecord { line, fields }
}

/// Coerce a single raw value. `None` is the absent marker.
pub fn normalize_value(kind: FieldKind, raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::Absent;
    };

    let coerced = match kind {
        FieldKind::Text => Ok(Value::Text(raw.to_string())),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| "not a base-10 integer".to_string()),
        FieldKind::Port => raw
            .parse::<u16>()
            .map(|p| Value::Integer(i64::from(p)))
            .map_err(|_| "not a port number".to_string()),
        FieldKind::Address => raw
            .parse::<IpAddr>()
            .map(Value::Address)
            .map_err(|_| "not an IP address".to_string()),
        FieldKind::Timestamp => parse_timestamp(raw)
            .map(Value::Timestamp)
            .ok_or_else(|| "not a Zeek epoch or RFC 3339 timestamp".to_string()),
        FieldKind::Endpoint => parse_endpoint(raw)
            .map(|(addr, port)| Value::Endpoint { addr, port })
            .ok_or_else(|| "not an addr:port pair".to_string()),
        FieldKind::Fingerprint(_) if raw.is_empty() => Ok(Value::Absent),
        FieldKind::Fingerprint(fp) => {
            fingerprint::validate(fp, raw).map(|()| Value::Fingerprint(raw.to_string()))
        }
    };

    coerced.unwrap_or_else(|reason| Value::Unnormalized {
        raw: raw.to_string(),
        reason,
    })
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parse Zeek's `seconds.micros` epoch form, falling back to RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_epoch(raw).or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = raw.split_once('.').unwrap_or((raw, ""));
    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let secs: i64 = secs.parse().ok()?;
    let nanos: u32 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<9}").parse().ok()?
    };
    DateTime::from_timestamp(secs, nanos)
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Split `addr:port` (or `[v6]:port`) into its halves.
pub fn parse_endpoint(raw: &str) -> Option<(IpAddr, u16)> {
    raw.parse::<SocketAddr>()
        .ok()
        .map(|sa| (sa.ip(), sa.port()))
}

pub fn format_endpoint(addr: IpAddr, port: u16) -> String {
    SocketAddr::new(addr, port).to_string()
}
