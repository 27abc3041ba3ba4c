//! Pipeline — drives tokenize → map → normalize → aggregate for one file.
//!
//! A [`Pipeline`] is built per invocation from an explicit schema and
//! [`PipelineOptions`]; it carries no state between runs. Malformed lines
//! are skipped and counted, fallback fields are counted as flagged, and only
//! structural problems (an unusable header) return `Err`.

use crate::aggregator::{dedup_exact, Aggregator, RecordFilter, RecordSet};
use crate::error::Result;
use crate::header::ZeekHeader;
use crate::mapper::ColumnMap;
use crate::normalizer::normalize;
use crate::schema::LogSchema;
use crate::tokenizer::{check_width, tokenize};
use crate::types::RawLogLine;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub filter: RecordFilter,
    /// Remove exact duplicate records after filtering.
    pub dedup: bool,
}

/// Counters reported at the end of every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data lines read (header and blank lines excluded).
    pub lines_read: usize,
    pub records_emitted: usize,
    /// Lines dropped for a wrong token count.
    pub skipped: usize,
    /// Emitted records with at least one field kept as a raw fallback.
    pub flagged: usize,
    pub filtered_out: usize,
    pub duplicates_removed: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "read {} lines, emitted {} records, skipped {}, flagged {}",
            self.lines_read, self.records_emitted, self.skipped, self.flagged
        )?;
        if self.filtered_out > 0 {
            write!(f, ", filtered out {}", self.filtered_out)?;
        }
        if self.duplicates_removed > 0 {
            write!(f, ", removed {} duplicates", self.duplicates_removed)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: RecordSet,
    pub summary: RunSummary,
}

pub struct Pipeline {
    schema: &'static LogSchema,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(schema: &'static LogSchema, options: PipelineOptions) -> Self {
        Self { schema, options }
    }

    pub fn schema(&self) -> &'static LogSchema {
        self.schema
    }

    /// Process every data line of one file.
    pub fn run<I>(&self, header: &ZeekHeader, lines: I) -> Result<PipelineOutput>
    where
        I: IntoIterator<Item = RawLogLine>,
    {
        let columns = ColumnMap::resolve(self.schema, header)?;
        let mut aggregator = Aggregator::new(self.schema, self.options.filter.clone());
        let mut summary = RunSummary::default();

        for line in lines {
            summary.lines_read += 1;

            let tokens = tokenize(&line.text, columns.separator());
            if let Err(malformed) = check_width(line.number, &tokens, columns.width()) {
                tracing::warn!(
                    line = malformed.line,
                    found = malformed.found,
                    expected = malformed.expected,
                    "skipping malformed line"
                );
                summary.skipped += 1;
                continue;
            }

            let fields = columns.map(&tokens)?;
            let record = normalize(self.schema, line.number, &fields);
            aggregator.push(record);
        }

        summary.filtered_out = aggregator.filtered_out();
        let mut records = aggregator.finish();
        if self.options.dedup {
            let (deduped, removed) = dedup_exact(records);
            records = deduped;
            summary.duplicates_removed = removed;
        }
        summary.records_emitted = records.len();
        summary.flagged = records.records().iter().filter(|r| r.is_flagged()).count();

        tracing::info!(kind = %self.schema.kind, %summary, "run complete");
        Ok(PipelineOutput { records, summary })
    }
}
