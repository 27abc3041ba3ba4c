//! Record tokenizer — splits one data line into raw field strings.
//!
//! Zeek's ASCII writer escapes the separator (and other non-printable bytes)
//! inside values as `\xHH`, so a plain split on the separator never cuts a
//! value in half. Escapes are decoded after splitting.

/// A data line whose token count does not match the active column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {} has {} fields, expected {}",
            self.line, self.found, self.expected
        )
    }
}

/// Split `line` on `separator` and decode `\xHH` escapes in each token.
pub fn tokenize(line: &str, separator: char) -> Vec<String> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.split(separator).map(unescape).collect()
}

/// Verify the token count of a line against the expected width.
pub fn check_width(line: usize, tokens: &[String], expected: usize) -> Result<(), MalformedLine> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(MalformedLine {
            line,
            expected,
            found: tokens.len(),
        })
    }
}

/// Decode Zeek `\xHH` escapes. Invalid sequences are kept literally; decoded
/// bytes that are not valid UTF-8 are replaced lossily.
pub fn unescape(token: &str) -> String {
    if !token.contains("\\x") {
        return token.to_string();
    }

    let bytes = token.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && bytes[i + 1] == b'x' {
            if let Some(b) = hex_byte(bytes[i + 2], bytes[i + 3]) {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}
