//! Domain-specific assertion macros for ja4log harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! record line and field, so a failing harness points straight at the row.

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a record field holds an expected [`Value`](ja4log_core::Value).
///
/// ```rust
/// assert_field!(record, "dst_port", Value::Integer(443));
/// ```
#[macro_export]
macro_rules! assert_field {
    ($record:expr, $name:expr, $value:expr) => {{
        let record: &ja4log_core::NormalizedRecord = &$record;
        let name: &str = $name;
        let expected: ja4log_core::Value = $value;
        match record.get(name) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual,
                &expected,
                "assert_field! failed: line {} field {:?}",
                record.line,
                name
            ),
            None => panic!(
                "assert_field! failed: field {:?} not in record.\n  Available: {:?}",
                name,
                record.names().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a record field is the absent marker.
#[macro_export]
macro_rules! assert_absent {
    ($record:expr, $name:expr) => {{
        let record: &ja4log_core::NormalizedRecord = &$record;
        let name: &str = $name;
        match record.get(name) {
            Some(v) if v.is_absent() => {}
            other => panic!(
                "assert_absent! failed: line {} field {:?} is {:?}",
                record.line, name, other
            ),
        }
    }};
}

/// Assert that a record field fell back to its raw string.
#[macro_export]
macro_rules! assert_unnormalized {
    ($record:expr, $name:expr, $raw:expr) => {{
        let record: &ja4log_core::NormalizedRecord = &$record;
        let name: &str = $name;
        match record.get(name) {
            Some(ja4log_core::Value::Unnormalized { raw, .. }) if raw == $raw => {}
            other => panic!(
                "assert_unnormalized! failed: line {} field {:?} is {:?}, expected raw {:?}",
                record.line, name, other, $raw
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Record-set assertions
// ---------------------------------------------------------------------------

/// Assert that every record in a set carries exactly the schema's field names
/// in schema order.
#[macro_export]
macro_rules! assert_schema_keys {
    ($set:expr) => {{
        let set: &ja4log_core::RecordSet = &$set;
        let expected: Vec<&str> = set.schema().field_names().collect();
        for record in set.records() {
            let actual: Vec<&str> = record.names().collect();
            pretty_assertions::assert_eq!(
                actual,
                expected,
                "assert_schema_keys! failed at line {}",
                record.line
            );
        }
    }};
}

/// Assert the source line numbers of the emitted records, in order.
#[macro_export]
macro_rules! assert_lines {
    ($set:expr, $lines:expr) => {{
        let set: &ja4log_core::RecordSet = &$set;
        let actual: Vec<usize> = set.records().iter().map(|r| r.line).collect();
        let expected: Vec<usize> = $lines.to_vec();
        pretty_assertions::assert_eq!(actual, expected, "assert_lines! failed");
    }};
}
