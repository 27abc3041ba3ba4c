//! Zeek header directive parsing.
//!
//! ```text
//! #separator \x09
//! #set_separator	,
//! #empty_field	(empty)
//! #unset_field	-
//! #path	conn
//! #open	2024-01-15-10-00-00
//! #fields	ts	uid	id.orig_h	...
//! #types	time	string	addr	...
//! ```
//!
//! `#separator` is space-delimited and its value is `\xHH`-escaped; every
//! other directive is delimited by the separator it declares.

use ja4log_core::tokenizer::unescape;
use ja4log_core::ZeekHeader;

/// Apply one `#` line to `header`. Returns the offending line on error.
pub fn apply_directive(header: &mut ZeekHeader, line: &str) -> Result<(), String> {
    let body = line.strip_prefix('#').unwrap_or(line);

    if let Some(value) = body.strip_prefix("separator ") {
        let decoded = unescape(value.trim());
        let mut chars = decoded.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => {
                header.separator = Some(c);
                Ok(())
            }
            _ => Err(line.to_string()),
        };
    }

    let sep = header.separator.unwrap_or('\t');
    let mut parts = body.split(sep);
    let name = parts.next().unwrap_or_default();
    let values: Vec<String> = parts.map(unescape).collect();
    let single = || values.first().cloned().ok_or_else(|| line.to_string());

    match name {
        "set_separator" => header.set_separator = Some(single()?),
        "empty_field" => header.empty_field = Some(single()?),
        "unset_field" => header.unset_field = Some(single()?),
        "path" => header.path = Some(single()?),
        "open" => header.open = Some(single()?),
        "fields" if values.is_empty() => return Err(line.to_string()),
        "fields" => header.fields = Some(values),
        "types" => header.types = Some(values),
        "close" => {}
        other => tracing::debug!(directive = other, "ignoring unknown header directive"),
    }
    Ok(())
}
