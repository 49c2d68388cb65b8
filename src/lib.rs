//! # Chatlens
//!
//! A Rust library for turning exported WhatsApp group chats (Brazilian
//! Portuguese locale) into a clean, ordered message table and computing group
//! statistics over it.
//!
//! ## Overview
//!
//! An export is a text file where each message starts with a header line:
//!
//! ```text
//! [01/02/2021, 09:00:00] Ana: Olha isso
//! algo sem cabeçalho
//! [01/02/2021, 09:01:00] Bia: figurinha omitida
//! ```
//!
//! Lines without a header continue the previous message. The parser merges
//! them, normalizes both date-time layouts into one canonical timestamp and
//! drops system notifications, media placeholders and (optionally) the
//! exporting user's own messages.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parsed = ChatParser::new().parse_file(Path::new("_chat.txt"))?;
//!     println!("{} messages, {} skipped", parsed.table.len(), parsed.report.skipped());
//!
//!     let report = Report::build(&parsed.table, &AnalysisConfig::default())?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! # #[cfg(feature = "streaming")]
//! # fn main() -> chatlens::Result<()> {
//! use std::path::Path;
//!
//! use chatlens::parser::ChatParser;
//!
//! for record in ChatParser::new().stream_file(Path::new("_chat.txt"))? {
//!     let record = record?;
//!     println!("{}: {}", record.author, record.message);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "streaming"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser), the batch entry points
//! - [`parsing`] - the pipeline stages: header classification, timestamp
//!   normalization, message assembly, record filtering
//! - [`streaming`] - [`RecordStream`](streaming::RecordStream) for large exports
//! - [`table`] - [`Table`], [`ParseReport`], [`ParsedChat`]
//! - [`analysis`] - keyword sets, activity statistics, emoji ranking, [`Report`](analysis::Report)
//! - [`output`] - CSV, JSON and JSONL exporters
//! - [`config`] - [`FilterConfig`](config::FilterConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`error`] - Unified error types ([`ChatlensError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod parsing;
pub mod record;
#[cfg(feature = "streaming")]
pub mod streaming;
pub mod table;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use record::MessageRecord;
pub use table::{ParseReport, ParsedChat, Table};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
///
/// let parsed = ChatParser::with_config(FilterConfig::lenient()).parse_str("")?;
/// assert!(parsed.table.is_empty());
/// # Ok::<(), ChatlensError>(())
/// ```
pub mod prelude {
    pub use crate::{MessageRecord, ParseReport, ParsedChat, Table};

    pub use crate::error::{ChatlensError, Result};

    pub use crate::parser::ChatParser;

    pub use crate::config::{AnalysisConfig, ChatlensConfig, FilterConfig};

    pub use crate::analysis::{KeywordMatcher, KeywordSet, Period, Report};

    pub use crate::output::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "streaming")]
    pub use crate::streaming::RecordStream;
}
