//! Sample fingerprints, logs, and one-call pipeline helpers.

use ja4log_core::{LogKind, Pipeline, PipelineOptions, PipelineOutput, SchemaRegistry};
use ja4log_feeds::read_log;

use super::builders::ZeekLogBuilder;

// ---------------------------------------------------------------------------
// Fingerprints
// ---------------------------------------------------------------------------

pub const JA4_CHROME: &str = "t13d1516h2_8daaf6152771_b186095e22b6";
pub const JA4_CURL: &str = "t13d3112h2_e8f1e7e78f70_6bebaf5329ac";
pub const JA4S_SERVER: &str = "t130200_1301_234ea6891581";
pub const JA4H_CHROME: &str = "ge11cn20enus_60ca1bd65281_ac95b44401d9_8df6a44f726c";
pub const JA4X_LETSENCRYPT: &str = "a373a9f83c6b_2bab15409345_7bf9a7bf7029";
pub const JA4T_LINUX: &str = "64240_2-1-3-1-1-4_1460_8";
pub const JA4TS_SERVER: &str = "65160_2-4-8-1-3_1460_7";

// ---------------------------------------------------------------------------
// Sample logs
// ---------------------------------------------------------------------------

/// Three conn rows; the second has no JA4T.
pub fn conn_log() -> String {
    ZeekLogBuilder::new(LogKind::Conn)
        .row(&[
            ("ts", "1700000000.250000"),
            ("uid", "CAbc1"),
            ("id.orig_h", "10.0.0.1"),
            ("id.orig_p", "51000"),
            ("id.resp_h", "10.0.0.2"),
            ("id.resp_p", "443"),
            ("proto", "tcp"),
            ("ja4t", JA4T_LINUX),
            ("ja4ts", JA4TS_SERVER),
        ])
        .row(&[
            ("ts", "1700000001.500000"),
            ("uid", "CAbc2"),
            ("id.orig_h", "10.0.0.3"),
            ("id.orig_p", "51001"),
            ("id.resp_h", "10.0.0.2"),
            ("id.resp_p", "80"),
            ("proto", "tcp"),
        ])
        .row(&[
            ("ts", "1700000002.000000"),
            ("uid", "CAbc3"),
            ("id.orig_h", "fe80::1"),
            ("id.orig_p", "51002"),
            ("id.resp_h", "fe80::2"),
            ("id.resp_p", "22"),
            ("proto", "tcp"),
            ("ja4t", JA4T_LINUX),
        ])
        .build()
}

/// Two TLS sessions; the second has no server hello.
pub fn ssl_log() -> String {
    ZeekLogBuilder::new(LogKind::Ssl)
        .row(&[
            ("ts", "1700000100.000000"),
            ("uid", "CSsl1"),
            ("id.orig_h", "192.168.1.10"),
            ("id.orig_p", "50000"),
            ("id.resp_h", "93.184.216.34"),
            ("id.resp_p", "443"),
            ("version", "TLSv13"),
            ("cipher", "TLS_AES_128_GCM_SHA256"),
            ("server_name", "example.com"),
            ("ja4", JA4_CHROME),
            ("ja4s", JA4S_SERVER),
        ])
        .row(&[
            ("ts", "1700000101.000000"),
            ("uid", "CSsl2"),
            ("id.orig_h", "192.168.1.11"),
            ("id.orig_p", "50001"),
            ("id.resp_h", "93.184.216.34"),
            ("id.resp_p", "443"),
            ("server_name", "(empty)"),
            ("ja4", JA4_CURL),
        ])
        .build()
}

pub fn http_log() -> String {
    ZeekLogBuilder::new(LogKind::Http)
        .row(&[
            ("ts", "1700000200.000000"),
            ("uid", "CHttp1"),
            ("id.orig_h", "192.168.1.10"),
            ("id.orig_p", "50100"),
            ("id.resp_h", "93.184.216.34"),
            ("id.resp_p", "80"),
            ("method", "GET"),
            ("host", "example.com"),
            ("uri", "/index.html"),
            ("user_agent", "Mozilla/5.0\\x09(X11)"),
            ("status_code", "200"),
            ("ja4h", JA4H_CHROME),
        ])
        .build()
}

pub fn x509_log() -> String {
    ZeekLogBuilder::new(LogKind::X509)
        .row(&[
            ("ts", "1700000300.000000"),
            ("uid", "CX5091"),
            ("fuid", "FAbc1"),
            ("id.orig_h", "192.168.1.10"),
            ("id.resp_h", "93.184.216.34"),
            ("version", "3"),
            ("serial", "04A1B2"),
            ("subject", "CN=example.com"),
            ("issuer", "CN=R3,O=Let's Encrypt,C=US"),
            ("validity.not_before", "1697000000.000000"),
            ("validity.not_after", "1704776000.000000"),
            ("key_type", "rsa"),
            ("sig_alg", "sha256WithRSAEncryption"),
            ("ja4x", JA4X_LETSENCRYPT),
        ])
        .build()
}

pub fn sample_log(kind: LogKind) -> String {
    match kind {
        LogKind::Conn => conn_log(),
        LogKind::Ssl => ssl_log(),
        LogKind::Http => http_log(),
        LogKind::X509 => x509_log(),
    }
}

// ---------------------------------------------------------------------------
// Pipeline helpers
// ---------------------------------------------------------------------------

/// Read `text` as a log and run it through a pass-through pipeline.
pub fn run_log(text: &str, kind: Option<LogKind>) -> ja4log_core::Result<PipelineOutput> {
    run_log_with(text, kind, PipelineOptions::default())
}

pub fn run_log_with(
    text: &str,
    kind: Option<LogKind>,
    options: PipelineOptions,
) -> ja4log_core::Result<PipelineOutput> {
    let input = read_log(text.as_bytes(), "fixture").expect("fixture logs are readable");
    let schema = SchemaRegistry::builtin().select(kind, input.header.path.as_deref())?;
    Pipeline::new(schema, options).run(&input.header, input.lines)
}
