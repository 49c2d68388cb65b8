//! Message assembly.
//!
//! The assembler is a small state machine over the lines of one export:
//!
//! ```text
//! Empty ──header──▶ Reading ──header──▶ Reading (previous record emitted)
//!   │                  │
//!   │ continuation     │ continuation: appended to the open record
//!   ▼ (orphan, dropped)│
//!  finish ────────────▶ Closed ◀── finish (open record emitted)
//! ```
//!
//! Blank lines are skipped before classification and never touch the open
//! record.

use std::mem;

use chrono::NaiveDateTime;

use super::header::{LineKind, ParsedHeader, Separator, classify_line};
use super::timestamp::parse_header_timestamp;
use crate::MessageRecord;
use crate::error::{ChatlensError, Result};

/// A record whose header has been seen but whose timestamp is still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    /// 1-based line number of the header
    pub line: usize,
    pub date_text: String,
    pub separator: Separator,
    pub time_text: String,
    pub author: String,
    pub message: String,
}

impl PendingRecord {
    fn open(line: usize, header: &ParsedHeader<'_>) -> Self {
        Self {
            line,
            date_text: header.date_text.to_string(),
            separator: header.separator,
            time_text: header.time_text.to_string(),
            author: header.author.to_string(),
            message: header.message_fragment.trim_end().to_string(),
        }
    }

    fn append(&mut self, continuation: &str) {
        self.message.push(' ');
        self.message.push_str(continuation);
    }

    /// Parses the header timestamp.
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        parse_header_timestamp(&self.date_text, self.separator, &self.time_text)
    }

    /// Converts into a [`MessageRecord`], failing if the timestamp is invalid.
    pub fn normalize(self) -> Result<MessageRecord> {
        let timestamp = self.timestamp()?;
        Ok(MessageRecord::new(timestamp, self.author, self.message))
    }
}

/// Byte order mark some editors prepend to the first line of a saved export.
const BOM: char = '\u{feff}';

#[derive(Debug, Default)]
enum AssemblerState {
    #[default]
    Empty,
    Reading(PendingRecord),
    Closed,
}

/// Line counters collected while assembling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerStats {
    /// Lines pushed, blank ones included
    pub lines_read: usize,
    /// Lines that were empty after trimming
    pub blank_lines: usize,
    /// Continuation lines seen before the first header
    pub orphan_lines: usize,
    /// Records emitted
    pub records_assembled: usize,
}

/// Joins header and continuation lines into records.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::MessageAssembler;
///
/// let mut assembler = MessageAssembler::new();
/// assert!(assembler.push_line("[01/02/2021, 09:00:00] Ana: Olha isso")?.is_none());
/// assert!(assembler.push_line("algo sem cabeçalho")?.is_none());
///
/// let record = assembler.finish().unwrap();
/// assert_eq!(record.message, "Olha isso algo sem cabeçalho");
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Default)]
pub struct MessageAssembler {
    state: AssemblerState,
    stats: AssemblerStats,
}

impl MessageAssembler {
    /// Creates an assembler in the `Empty` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw line as UTF-8 and pushes it.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<Option<PendingRecord>> {
        if self.is_closed() {
            return Err(ChatlensError::Closed);
        }
        let line = std::str::from_utf8(bytes)
            .map_err(|e| ChatlensError::decode(self.stats.lines_read + 1, e))?;
        self.push_line(line)
    }

    /// Pushes one decoded line.
    ///
    /// Returns the previous record when `line` opens a new one.
    pub fn push_line(&mut self, line: &str) -> Result<Option<PendingRecord>> {
        if self.is_closed() {
            return Err(ChatlensError::Closed);
        }

        self.stats.lines_read += 1;
        let line = line.trim_end_matches(['\r', '\n']);
        let line = if self.stats.lines_read == 1 {
            line.trim_start_matches(BOM)
        } else {
            line
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.stats.blank_lines += 1;
            return Ok(None);
        }

        // Trailing whitespace stays: `Bia: ` with an empty message is still a header.
        match classify_line(line.trim_start()) {
            LineKind::Header(header) => {
                let opened = PendingRecord::open(self.stats.lines_read, &header);
                match mem::replace(&mut self.state, AssemblerState::Reading(opened)) {
                    AssemblerState::Reading(previous) => Ok(Some(self.emit(previous))),
                    _ => Ok(None),
                }
            }
            LineKind::Continuation => {
                match &mut self.state {
                    AssemblerState::Reading(open) => open.append(trimmed),
                    _ => self.stats.orphan_lines += 1,
                }
                Ok(None)
            }
        }
    }

    /// Ends the input, returning the record still open, if any.
    ///
    /// Calling `finish` again is a no-op.
    pub fn finish(&mut self) -> Option<PendingRecord> {
        match mem::replace(&mut self.state, AssemblerState::Closed) {
            AssemblerState::Reading(open) => Some(self.emit(open)),
            _ => None,
        }
    }

    fn emit(&mut self, record: PendingRecord) -> PendingRecord {
        self.stats.records_assembled += 1;
        record
    }

    /// Returns `true` once [`finish`](Self::finish) has been called.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, AssemblerState::Closed)
    }

    /// Returns `true` while a record is open.
    pub fn is_reading(&self) -> bool {
        matches!(self.state, AssemblerState::Reading(_))
    }

    /// Returns the counters collected so far.
    pub fn stats(&self) -> AssemblerStats {
        self.stats
    }
}
