//! Text-to-record parsing stages.
//!
//! Lines flow through the stages in this order:
//!
//! 1. [`header`] - classify a line as a header or a continuation
//! 2. [`assembler`] - join continuations into the open record
//! 3. [`timestamp`] - normalize the header date and time
//! 4. [`filter`] - drop system events, media placeholders and self messages
//!
//! [`ChatParser`](crate::parser::ChatParser) wires the stages together; the
//! items here are public for callers that need a single stage.

pub mod assembler;
pub mod filter;
pub mod header;
pub mod timestamp;

pub use assembler::{AssemblerStats, MessageAssembler, PendingRecord};
pub use filter::{RecordFilter, Verdict};
pub use header::{HEADER_PATTERN, LineKind, ParsedHeader, Separator, classify_line};
pub use timestamp::{DateFormat, normalize_timestamp, parse_header_timestamp};
