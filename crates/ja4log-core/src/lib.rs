//! ja4log-core — JA4+ log record extraction.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! types used across all stages.
//!
//! # Architecture
//!
//! ```text
//! RawLogLine ──► Tokenizer ──► Mapper ──► Normalizer ──► Aggregator ──► Export
//!                                ▲
//!                  LogSchema + ZeekHeader
//! ```
//!
//! Everything is synchronous and single-pass. One [`pipeline::Pipeline`] is
//! built per input file; the [`schema::SchemaRegistry`] it draws from is an
//! explicit value, not global state.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod header;
pub mod mapper;
pub mod normalizer;
pub mod pipeline;
pub mod schema;
pub mod tokenizer;
pub mod types;

pub use aggregator::{RecordFilter, RecordSet, StreamId};
pub use error::{Error, Result};
pub use export::{OutputFormat, OutputTarget, RenderOptions, TimestampStyle};
pub use header::ZeekHeader;
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutput, RunSummary};
pub use schema::{LogSchema, SchemaRegistry};
pub use types::{FingerprintKind, LogKind, NormalizedRecord, RawLogLine, Value};
