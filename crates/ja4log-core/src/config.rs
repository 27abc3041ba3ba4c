//! Configuration types for ja4log.
//!
//! [`Config::load`] layers `~/.config/ja4log/config.toml` (or an explicit
//! path) on top of the embedded defaults. [`Config::defaults`] returns the
//! same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::export::{OutputFormat, RenderOptions, TimestampStyle};
use crate::types::LogKind;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[input]
log_dir = "/mnt/zeek_logs/current"

[output]
format      = "csv"
base_dir    = "/mnt/zeek_logs/ja4"
timestamps  = "iso8601"
pretty_json = true

[output.subdirs]
conn = "ja4t_ja4ts_hourly"
ssl  = "ja4s_ssl_hourly"
http = "ja4h_http_hourly"
x509 = "ja4x_x509_hourly"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/ja4log/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[input]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Directory holding the live Zeek logs (`conn.log`, `ssl.log`, ...).
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_log_dir() -> PathBuf { PathBuf::from("/mnt/zeek_logs/current") }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

impl InputConfig {
    /// Default input file for a kind, e.g. `<log_dir>/conn.log`.
    pub fn log_path(&self, kind: LogKind) -> PathBuf {
        self.log_dir.join(format!("{}.log", kind.zeek_path()))
    }
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    /// Root of the per-kind export directories used by `--output-dir` mode.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default)]
    pub timestamps: TimestampStyle,
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
    #[serde(default)]
    pub subdirs: SubdirConfig,
}

fn default_format() -> OutputFormat { OutputFormat::Csv }
fn default_base_dir() -> PathBuf { PathBuf::from("/mnt/zeek_logs/ja4") }
fn default_pretty_json() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            base_dir: default_base_dir(),
            timestamps: TimestampStyle::default(),
            pretty_json: default_pretty_json(),
            subdirs: SubdirConfig::default(),
        }
    }
}

impl OutputConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            timestamps: self.timestamps,
            pretty_json: self.pretty_json,
            annotate: false,
        }
    }

    /// Export directory for a kind, e.g. `<base_dir>/ja4t_ja4ts_hourly`.
    pub fn export_dir(&self, kind: LogKind) -> PathBuf {
        self.base_dir.join(self.subdirs.get(kind))
    }
}

/// `[output.subdirs]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubdirConfig {
    #[serde(default = "default_conn_dir")]
    pub conn: String,
    #[serde(default = "default_ssl_dir")]
    pub ssl: String,
    #[serde(default = "default_http_dir")]
    pub http: String,
    #[serde(default = "default_x509_dir")]
    pub x509: String,
}

fn default_conn_dir() -> String { "ja4t_ja4ts_hourly".to_string() }
fn default_ssl_dir() -> String { "ja4s_ssl_hourly".to_string() }
fn default_http_dir() -> String { "ja4h_http_hourly".to_string() }
fn default_x509_dir() -> String { "ja4x_x509_hourly".to_string() }

impl Default for SubdirConfig {
    fn default() -> Self {
        Self {
            conn: default_conn_dir(),
            ssl: default_ssl_dir(),
            http: default_http_dir(),
            x509: default_x509_dir(),
        }
    }
}

impl SubdirConfig {
    pub fn get(&self, kind: LogKind) -> &str {
        match kind {
            LogKind::Conn => &self.conn,
            LogKind::Ssl => &self.ssl,
            LogKind::Http => &self.http,
            LogKind::X509 => &self.x509,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path`, or from `~/.config/ja4log/config.toml` when `None`,
    /// layered on top of the built-in defaults. An explicit path must exist;
    /// the default path is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("ja4log")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
