//! Structural validation of JA4+ fingerprint strings.
//!
//! Only the shape is checked (segment count, segment lengths, alphabet). A
//! well-formed fingerprint can still be wrong; that is the plugin's concern.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::FingerprintKind;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

// t13d1516h2_8daaf6152771_b186095e22b6
static JA4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[tqd][0-9a-z]{2}[di][0-9]{2}[0-9]{2}[0-9a-zA-Z]{2}_[0-9a-f]{12}_[0-9a-f]{12}$")
        .expect("JA4 pattern")
});

// t120400_c030_4e8089608790
static JA4S: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[tqd][0-9a-z]{2}[0-9]{2}[0-9a-zA-Z]{2}_[0-9a-f]{4}_[0-9a-f]{12}$")
        .expect("JA4S pattern")
});

// ge11cn20enus_60ca1bd65281_ac95b44401d9_8df6a44f726c
static JA4H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2}[0-9]{2}[cn][rn][0-9]{2}[0-9a-z]{4}_[0-9a-f]{12}_[0-9a-f]{12}_[0-9a-f]{12}$")
        .expect("JA4H pattern")
});

// a373a9f83c6b_2bab15409345_7bf9a7bf7029
static JA4X: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{12}_[0-9a-f]{12}_[0-9a-f]{12}$").expect("JA4X pattern")
});

// 64240_2-1-3-1-1-4_1460_8 (JA4TS shares the layout). A SYN without options
// leaves the second segment empty: 1024__0_0.
static JA4T: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,5}_(?:00|[0-9]{1,3}(?:-[0-9]{1,3})*)?_[0-9]{1,5}_[0-9]{1,3}$")
        .expect("JA4T pattern")
});

fn pattern(kind: FingerprintKind) -> &'static Regex {
    match kind {
        FingerprintKind::Ja4 => &JA4,
        FingerprintKind::Ja4s => &JA4S,
        FingerprintKind::Ja4h => &JA4H,
        FingerprintKind::Ja4x => &JA4X,
        FingerprintKind::Ja4t | FingerprintKind::Ja4ts => &JA4T,
    }
}

/// Number of `_`-separated segments a fingerprint of `kind` has.
pub fn segment_count(kind: FingerprintKind) -> usize {
    match kind {
        FingerprintKind::Ja4 | FingerprintKind::Ja4s | FingerprintKind::Ja4x => 3,
        FingerprintKind::Ja4h | FingerprintKind::Ja4t | FingerprintKind::Ja4ts => 4,
    }
}

/// Check `value` against the shape of `kind`.
///
/// Returns a short reason on failure, suitable for a field issue annotation.
pub fn validate(kind: FingerprintKind, value: &str) -> Result<(), String> {
    if pattern(kind).is_match(value) {
        return Ok(());
    }
    let segments = value.split('_').count();
    let expected = segment_count(kind);
    if segments != expected {
        Err(format!(
            "malformed {kind} fingerprint: {segments} segments, expected {expected}"
        ))
    } else {
        Err(format!("malformed {kind} fingerprint"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ja4(FingerprintKind::Ja4, "t13d1516h2_8daaf6152771_b186095e22b6")]
    #[case::ja4_quic(FingerprintKind::Ja4, "q13d0312h3_55b375c5d22e_06cda9e17597")]
    #[case::ja4_no_alpn(FingerprintKind::Ja4, "t12i210600_76e208dd3e22_2dae41c691ec")]
    #[case::ja4s(FingerprintKind::Ja4s, "t120400_c030_4e8089608790")]
    #[case::ja4h(FingerprintKind::Ja4h, "ge11cn20enus_60ca1bd65281_ac95b44401d9_8df6a44f726c")]
    #[case::ja4h_no_lang(FingerprintKind::Ja4h, "po11nn050000_cfd1e1d1e2e2_000000000000_000000000000")]
    #[case::ja4x(FingerprintKind::Ja4x, "a373a9f83c6b_2bab15409345_7bf9a7bf7029")]
    #[case::ja4t(FingerprintKind::Ja4t, "64240_2-1-3-1-1-4_1460_8")]
    #[case::ja4t_no_options(FingerprintKind::Ja4t, "1024_00_0_0")]
    #[case::ja4t_empty_options(FingerprintKind::Ja4t, "1024__0_0")]
    #[case::ja4ts_empty_options(FingerprintKind::Ja4ts, "65535__0_0")]
    #[case::ja4ts(FingerprintKind::Ja4ts, "65160_2-4-8-1-3_1460_7")]
    fn valid_fingerprints(#[case] kind: FingerprintKind, #[case] value: &str) {
        assert_eq!(validate(kind, value), Ok(()));
    }

    #[rstest]
    #[case::ja4_uppercase_hash(FingerprintKind::Ja4, "t13d1516h2_8DAAF6152771_b186095e22b6")]
    #[case::ja4_short_hash(FingerprintKind::Ja4, "t13d1516h2_8daaf615277_b186095e22b6")]
    #[case::ja4_raw_form(FingerprintKind::Ja4, "t13d1516h2_002f,0035_0005,000a")]
    #[case::ja4s_as_ja4(FingerprintKind::Ja4, "t120400_c030_4e8089608790")]
    #[case::ja4h_bad_cookie_flag(FingerprintKind::Ja4h, "ge11xn20enus_60ca1bd65281_ac95b44401d9_8df6a44f726c")]
    #[case::ja4x_two_segments(FingerprintKind::Ja4x, "a373a9f83c6b_2bab15409345")]
    #[case::ja4t_letters(FingerprintKind::Ja4t, "64240_2-1-x_1460_8")]
    #[case::ja4t_empty_window(FingerprintKind::Ja4t, "__0_0")]
    #[case::garbage(FingerprintKind::Ja4ts, "not-a-fingerprint")]
    fn malformed_fingerprints(#[case] kind: FingerprintKind, #[case] value: &str) {
        assert!(validate(kind, value).is_err(), "{value} should not validate as {kind}");
    }

    #[test]
    fn reason_mentions_segment_count() {
        let reason = validate(FingerprintKind::Ja4x, "a373a9f83c6b_2bab15409345").unwrap_err();
        assert_eq!(reason, "malformed ja4x fingerprint: 2 segments, expected 3");
    }
}
