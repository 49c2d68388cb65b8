//! Transcript parser.
//!
//! [`ChatParser`] runs the full pipeline over one export:
//!
//! ```text
//! bytes ─▶ decode ─▶ classify ─▶ assemble ─▶ normalize ─▶ filter ─▶ Table
//! ```
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::ChatParser;
//!
//! let parser = ChatParser::new();
//! let parsed = parser.parse_str(
//!     "[01/02/2021, 09:00:00] Ana: Olha isso\n\
//!      algo sem cabeçalho\n\
//!      [01/02/2021, 09:05:00] Bia: figurinha omitida\n",
//! )?;
//!
//! assert_eq!(parsed.table.len(), 1);
//! assert_eq!(parsed.table.records()[0].message, "Olha isso algo sem cabeçalho");
//! assert_eq!(parsed.report.excluded_media, 1);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::MessageRecord;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::parsing::{MessageAssembler, PendingRecord, RecordFilter};
use crate::table::{ParseReport, ParsedChat, TableBuilder};

#[cfg(feature = "streaming")]
use crate::streaming::RecordStream;

/// Single-pass state shared by the batch and streaming entry points.
///
/// Records come out only when the next header or the end of input closes
/// them, already normalized and filtered.
#[derive(Debug)]
pub struct Pipeline {
    assembler: MessageAssembler,
    filter: RecordFilter,
    report: ParseReport,
}

impl Pipeline {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            assembler: MessageAssembler::new(),
            filter: RecordFilter::new(config),
            report: ParseReport::default(),
        }
    }

    /// Decodes and pushes one raw line.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<Option<MessageRecord>> {
        let closed = self.assembler.push_bytes(bytes)?;
        Ok(closed.and_then(|pending| self.resolve(pending)))
    }

    /// Pushes one decoded line.
    pub fn push_line(&mut self, line: &str) -> Result<Option<MessageRecord>> {
        let closed = self.assembler.push_line(line)?;
        Ok(closed.and_then(|pending| self.resolve(pending)))
    }

    /// Ends the input.
    pub fn finish(&mut self) -> Option<MessageRecord> {
        let closed = self.assembler.finish();
        closed.and_then(|pending| self.resolve(pending))
    }

    /// Returns the counters collected so far.
    pub fn report(&self) -> ParseReport {
        let mut report = self.report;
        report.absorb(self.assembler.stats());
        report
    }

    fn resolve(&mut self, pending: PendingRecord) -> Option<MessageRecord> {
        let line = pending.line;
        let record = match pending.normalize() {
            Ok(record) => record,
            Err(e) => {
                self.report.invalid_timestamps += 1;
                warn!(line, error = %e, "skipping record with invalid timestamp");
                return None;
            }
        };

        let verdict = self.filter.verdict(&record);
        self.report.record_verdict(verdict);
        if verdict.is_keep() {
            Some(record)
        } else {
            debug!(line, ?verdict, author = %record.author, "record excluded");
            None
        }
    }
}

/// Parser for exported group transcripts.
///
/// Holds no state between runs: parsing the same input twice yields the
/// same table and report.
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: FilterConfig,
}

impl ChatParser {
    /// Creates a new parser with the default (strict) filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with a custom filter configuration.
    pub fn with_config(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Starts a fresh pipeline with this parser's configuration.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(&self.config)
    }

    /// Parses raw byte lines, e.g. from an upload.
    ///
    /// Invalid UTF-8 in any line aborts the whole run with
    /// [`ChatlensError::Decode`](crate::ChatlensError::Decode).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::parser::ChatParser;
    ///
    /// let lines: Vec<&[u8]> = vec![b"[01/02/2021, 09:00:00] Ana: Bom dia"];
    /// let parsed = ChatParser::new().parse_lines(lines)?;
    /// assert_eq!(parsed.table.records()[0].timestamp.to_string(), "2021-02-01 09:00:00");
    /// # Ok::<(), chatlens::ChatlensError>(())
    /// ```
    pub fn parse_lines<I, L>(&self, lines: I) -> Result<ParsedChat>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut pipeline = self.pipeline();
        let mut builder = TableBuilder::new();
        for line in lines {
            builder.extend(pipeline.push_bytes(line.as_ref())?);
        }
        Ok(Self::complete(pipeline, builder))
    }

    /// Parses an already decoded export.
    pub fn parse_str(&self, content: &str) -> Result<ParsedChat> {
        let mut pipeline = self.pipeline();
        let mut builder = TableBuilder::new();
        for line in content.lines() {
            builder.extend(pipeline.push_line(line)?);
        }
        Ok(Self::complete(pipeline, builder))
    }

    /// Parses an export from a buffered reader, line by line.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<ParsedChat> {
        let mut pipeline = self.pipeline();
        let mut builder = TableBuilder::new();
        let mut buf = Vec::with_capacity(4096);
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            builder.extend(pipeline.push_bytes(&buf)?);
        }
        Ok(Self::complete(pipeline, builder))
    }

    /// Parses an export file.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedChat> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "parsing export file");
        self.parse_reader(BufReader::new(file))
    }

    /// Streams records from a reader without materializing the table.
    #[cfg(feature = "streaming")]
    pub fn stream<R: BufRead>(&self, reader: R) -> RecordStream<R> {
        RecordStream::new(reader, self.pipeline())
    }

    /// Streams records from an export file.
    #[cfg(feature = "streaming")]
    pub fn stream_file(&self, path: &Path) -> Result<RecordStream<BufReader<File>>> {
        let file = File::open(path)?;
        let total_bytes = file.metadata()?.len();
        Ok(self.stream(BufReader::new(file)).with_total_bytes(total_bytes))
    }

    fn complete(mut pipeline: Pipeline, mut builder: TableBuilder) -> ParsedChat {
        builder.extend(pipeline.finish());
        let report = pipeline.report();
        info!(
            lines = report.lines_read,
            records = report.records_kept,
            skipped = report.skipped(),
            "parsed transcript"
        );
        ParsedChat {
            table: builder.build(),
            report,
        }
    }
}
