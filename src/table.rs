//! The tabular output of the parser.
//!
//! A [`Table`] is an ordered sequence of [`MessageRecord`]s in the order they
//! appear in the export. It is never sorted or deduplicated: exports may
//! contain out-of-order timestamps and those are preserved as observed.
//!
//! [`ParseReport`] carries the counters of one parser run, so callers can see
//! how many lines and records were dropped and why.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::MessageRecord;
use crate::parsing::{AssemblerStats, Verdict};

/// Ordered message records of one export.
///
/// # Example
///
/// ```rust
/// use chatlens::{MessageRecord, Table};
/// use chrono::NaiveDateTime;
///
/// let table: Table = vec![
///     MessageRecord::new(NaiveDateTime::default(), "Ana", "Oi"),
///     MessageRecord::new(NaiveDateTime::default(), "Bia", "Olá"),
/// ]
/// .into_iter()
/// .collect();
///
/// let from_ana = table.filter(|r| r.author == "Ana");
/// assert_eq!(from_ana.len(), 1);
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    records: Vec<MessageRecord>,
}

impl Table {
    /// Creates a table from records, keeping their order.
    pub fn new(records: Vec<MessageRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }

    /// Returns the rows matching `predicate` as a new table, in order.
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Table
    where
        P: FnMut(&MessageRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Returns the earliest and latest timestamps, or `None` for an empty table.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.records.iter().map(|r| r.timestamp).min()?;
        let last = self.records.iter().map(|r| r.timestamp).max()?;
        Some((first, last))
    }
}

impl FromIterator<MessageRecord> for Table {
    fn from_iter<I: IntoIterator<Item = MessageRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Table {
    type Item = MessageRecord;
    type IntoIter = std::vec::IntoIter<MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Appends accepted records in arrival order.
#[derive(Debug, Default)]
pub struct TableBuilder {
    records: Vec<MessageRecord>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MessageRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn build(self) -> Table {
        Table::new(self.records)
    }
}

impl Extend<MessageRecord> for TableBuilder {
    fn extend<I: IntoIterator<Item = MessageRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

/// Counters for one parser run.
///
/// `records_assembled == records_kept + skipped()` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Lines read, blank ones included
    pub lines_read: usize,
    /// Lines empty after trimming
    pub blank_lines: usize,
    /// Continuation lines before the first header
    pub orphan_lines: usize,
    /// Records closed by the assembler
    pub records_assembled: usize,
    /// Records whose header date or time could not be parsed
    pub invalid_timestamps: usize,
    /// Records dropped as system notifications
    pub excluded_system_events: usize,
    /// Records dropped as media placeholders
    pub excluded_media: usize,
    /// Records dropped as written by the exporting user
    pub excluded_self_author: usize,
    /// Records in the table
    pub records_kept: usize,
}

impl ParseReport {
    /// Records assembled but not kept.
    pub fn skipped(&self) -> usize {
        self.invalid_timestamps
            + self.excluded_system_events
            + self.excluded_media
            + self.excluded_self_author
    }

    pub(crate) fn record_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Keep => self.records_kept += 1,
            Verdict::SystemEvent => self.excluded_system_events += 1,
            Verdict::Media => self.excluded_media += 1,
            Verdict::SelfAuthor => self.excluded_self_author += 1,
        }
    }

    pub(crate) fn absorb(&mut self, stats: AssemblerStats) {
        self.lines_read = stats.lines_read;
        self.blank_lines = stats.blank_lines;
        self.orphan_lines = stats.orphan_lines;
        self.records_assembled = stats.records_assembled;
    }
}

/// A parsed export: the table plus the report of how it was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedChat {
    pub table: Table,
    pub report: ParseReport,
}
