//! Command-line layer: argument parsing and wiring feeds → pipeline → export.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use ja4log_core::config::Config;
use ja4log_core::export::{self, OutputFormat, OutputTarget, RenderOptions, TimestampStyle};
use ja4log_core::{
    FingerprintKind, LogKind, Pipeline, PipelineOptions, RecordFilter, RecordSet, RunSummary,
    SchemaRegistry, StreamId,
};
use ja4log_feeds::{file, stdin, LogInput};

#[derive(Debug, Parser)]
#[command(
    name = "ja4log",
    version,
    about = "Extract JA4+ fingerprint records from Zeek logs as CSV or JSON"
)]
pub struct Cli {
    /// Zeek log to read (`-` for stdin). Defaults to `<input.log_dir>/<kind>.log`.
    pub input: Option<PathBuf>,

    /// Log type: conn, ssl, http or x509. Defaults to the file's `#path`.
    #[arg(short, long)]
    pub kind: Option<LogKind>,

    /// Output format: csv or json.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Write to this file instead of stdout.
    #[arg(short, long, conflicts_with_all = ["output_dir", "export"])]
    pub output: Option<PathBuf>,

    /// Write timestamped CSV and JSON files into this directory.
    #[arg(short = 'd', long, conflicts_with = "export")]
    pub output_dir: Option<PathBuf>,

    /// Like --output-dir, using the configured per-kind export directory.
    #[arg(long)]
    pub export: bool,

    /// Keep only records carrying this fingerprint type (ja4, ja4s, ja4h, ja4x, ja4t, ja4ts).
    #[arg(short = 'j', long = "fingerprint")]
    pub fingerprint: Option<FingerprintKind>,

    /// Keep only one connection: a Zeek uid, or an `addr:port` on either side.
    #[arg(short, long)]
    pub stream: Option<String>,

    /// Drop records with no fingerprint value at all.
    #[arg(long)]
    pub require_fingerprint: bool,

    /// Drop exact duplicate records.
    #[arg(long)]
    pub dedup: bool,

    /// Add an `_issues` column naming fields kept as raw strings.
    #[arg(short, long)]
    pub verbose: bool,

    /// Timestamp rendering: iso8601 or epoch.
    #[arg(long)]
    pub timestamps: Option<TimestampStyle>,

    /// Emit compact (single-line) JSON.
    #[arg(long)]
    pub compact: bool,

    /// Config file (default: ~/.config/ja4log/config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            fingerprint: self.fingerprint,
            stream: self.stream.as_deref().map(StreamId::parse),
            require_fingerprint: self.require_fingerprint,
        }
    }

    fn render_options(&self, config: &Config) -> RenderOptions {
        let mut opts = config.output.render_options();
        opts.annotate = self.verbose;
        if self.compact {
            opts.pretty_json = false;
        }
        if let Some(ts) = self.timestamps {
            opts.timestamps = ts;
        }
        opts
    }
}

/// Run one extraction and return its summary.
pub fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let input = read_input(cli, &config)?;

    let registry = SchemaRegistry::builtin();
    let schema = registry
        .select(cli.kind, input.header.path.as_deref())
        .with_context(|| format!("selecting schema for {}", input.origin))?;

    let options = PipelineOptions {
        filter: cli.filter(),
        dedup: cli.dedup,
    };
    let out = Pipeline::new(schema, options)
        .run(&input.header, input.lines)
        .with_context(|| format!("processing {}", input.origin))?;

    let opts = cli.render_options(&config);
    let export_dir = match (&cli.output_dir, cli.export) {
        (Some(dir), _) => Some(dir.clone()),
        (None, true) => Some(config.output.export_dir(schema.kind)),
        (None, false) => None,
    };

    match export_dir {
        Some(dir) => write_export_dir(&out.records, &dir, &opts)?,
        None => {
            let format = cli.format.unwrap_or(config.output.format);
            let target = cli
                .output
                .clone()
                .map(OutputTarget::Path)
                .unwrap_or(OutputTarget::Stdout);
            export::write(&out.records, format, &target, &opts)
                .with_context(|| format!("writing {format:?} output"))?;
        }
    }

    Ok(out.summary)
}

fn read_input(cli: &Cli, config: &Config) -> anyhow::Result<LogInput> {
    let input = match &cli.input {
        Some(p) if p.as_os_str() == "-" => stdin::read()?,
        Some(p) => file::open(p)?,
        None => {
            let kind = cli
                .kind
                .context("no input file given; pass a path or --kind to read the live log")?;
            file::open(&config.input.log_path(kind))?
        }
    };
    Ok(input)
}

/// Hourly-export mode: `<dir>/<stem>_<YYYYmmdd_HHMMSS>.{csv,json}`.
fn write_export_dir(records: &RecordSet, dir: &Path, opts: &RenderOptions) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let stem = records.schema().file_stem;

    for format in [OutputFormat::Csv, OutputFormat::Json] {
        let path = dir.join(format!("{stem}_{stamp}.{}", format.extension()));
        export::write(records, format, &OutputTarget::Path(path.clone()), opts)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), records = records.len(), "exported");
    }
    Ok(())
}
