//! Streaming record iterator.
//!
//! [`RecordStream`] reads an export line by line and yields each record as
//! soon as the next header (or end of input) closes it. Ordering, merging and
//! filtering are identical to [`ChatParser::parse_reader`]; only the table is
//! never materialized.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::ChatParser;
//!
//! let export = "[01/02/2021, 09:00:00] Ana: Oi\n[01/02/2021, 09:01:00] Bia: Olá\n";
//! let mut stream = ChatParser::new().stream(export.as_bytes());
//!
//! let authors: Vec<String> = stream
//!     .by_ref()
//!     .map(|r| r.map(|record| record.author))
//!     .collect::<chatlens::Result<_>>()?;
//! assert_eq!(authors, ["Ana", "Bia"]);
//! assert_eq!(stream.report().records_kept, 2);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! [`ChatParser::parse_reader`]: crate::parser::ChatParser::parse_reader

use std::io::BufRead;

use crate::MessageRecord;
use crate::error::Result;
use crate::parser::Pipeline;
use crate::table::ParseReport;

/// Iterator over the records of one export.
///
/// A decode or I/O error is yielded once and ends the stream.
pub struct RecordStream<R: BufRead> {
    reader: R,
    pipeline: Pipeline,
    line_buffer: Vec<u8>,
    bytes_read: u64,
    total_bytes: Option<u64>,
    finished: bool,
}

impl<R: BufRead> RecordStream<R> {
    pub fn new(reader: R, pipeline: Pipeline) -> Self {
        Self {
            reader,
            pipeline,
            line_buffer: Vec::with_capacity(4096),
            bytes_read: 0,
            total_bytes: None,
            finished: false,
        }
    }

    /// Sets the input size, enabling [`progress`](Self::progress).
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// Returns the progress as a percentage (0.0 - 100.0), if the size is known.
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) | None => None,
            Some(total) => Some((self.bytes_read as f64 / total as f64) * 100.0),
        }
    }

    /// Returns the number of bytes read so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Returns the counters collected so far.
    pub fn report(&self) -> ParseReport {
        self.pipeline.report()
    }

    fn read_line(&mut self) -> std::io::Result<bool> {
        self.line_buffer.clear();
        let bytes = self.reader.read_until(b'\n', &mut self.line_buffer)?;
        self.bytes_read += bytes as u64;
        Ok(bytes > 0)
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<MessageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.read_line() {
                Ok(true) => match self.pipeline.push_bytes(&self.line_buffer) {
                    Ok(Some(record)) => return Some(Ok(record)),
                    Ok(None) => {}
                    Err(e) => {
                        self.finished = true;
                        return Some(Err(e));
                    }
                },
                Ok(false) => {
                    self.finished = true;
                    return self.pipeline.finish().map(Ok);
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::ChatlensError;
    use crate::parser::ChatParser;

    const EXPORT: &str = "\
orphan line
[01/02/2021, 09:00:00] Ana: Olha isso
algo sem cabeçalho
[01/02/2021, 09:01:00] Bia: figurinha omitida
[02/02/2021 09:02:00] Bia: separador de um espaço só
[02/02/2021, 09:03:00] Bia: último";

    #[test]
    fn test_stream_matches_batch() {
        let parser = ChatParser::new();
        let batch = parser.parse_str(EXPORT).unwrap();

        let mut stream = parser.stream(EXPORT.as_bytes());
        let streamed: Vec<_> = stream.by_ref().collect::<Result<_, _>>().unwrap();

        assert_eq!(streamed, batch.table.into_records());
        assert_eq!(stream.report(), batch.report);
    }

    #[test]
    fn test_stream_yields_on_close() {
        let mut stream = ChatParser::new().stream(EXPORT.as_bytes());
        let first = stream.next().unwrap().unwrap();
        assert_eq!(first.message, "Olha isso algo sem cabeçalho");
        let last = stream.next().unwrap().unwrap();
        assert_eq!(last.message, "último");
        assert!(stream.next().is_none());
        // The sticker swallowed the single-space line as a continuation
        assert_eq!(stream.report().excluded_media, 1);
        assert_eq!(stream.report().orphan_lines, 1);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_stream_stops_after_decode_error() {
        let input: &[u8] = b"[01/02/2021, 09:00:00] Ana: Oi\n\xff\n[01/02/2021, 09:01:00] Bia: Oi\n";
        let mut stream = ChatParser::new().stream(input);
        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(err, ChatlensError::Decode { line: 2, .. }));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_progress() {
        let stream = ChatParser::new().stream(EXPORT.as_bytes());
        assert!(stream.progress().is_none());

        let mut stream = ChatParser::new()
            .stream(EXPORT.as_bytes())
            .with_total_bytes(EXPORT.len() as u64);
        while stream.next().is_some() {}
        assert_eq!(stream.bytes_processed(), EXPORT.len() as u64);
        assert!((stream.progress().unwrap() - 100.0).abs() < f64::EPSILON);
    }
}
