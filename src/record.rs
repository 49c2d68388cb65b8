//! The message record produced by the parser.
//!
//! Every row of a [`Table`](crate::Table) is a [`MessageRecord`]: a canonical
//! timestamp, the author exactly as written in the export, and the full
//! message text with continuation lines joined by single spaces.
//!
//! # Examples
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2021, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let record = MessageRecord::new(ts, "Ana", "Bom dia");
//!
//! assert_eq!(record.author(), "Ana");
//! assert_eq!(record.char_count(), 7);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let record = MessageRecord::new(ts, "Ana", "Bom dia");
//! let json = serde_json::to_string(&record)?;
//!
//! assert!(json.contains(r#""timestamp":"2021-02-01T09:00:00""#));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One message of a chat transcript.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | When the message was sent (second precision, local time of the export) |
/// | `author` | `String` | Author name or phone number as it appears in the log |
/// | `message` | `String` | Full text, continuation lines joined by `' '` |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent.
    ///
    /// Exports carry no timezone, so the value is kept naive.
    pub timestamp: NaiveDateTime,

    /// Free-text identity of the author. Not normalized against any contact list.
    pub author: String,

    /// Text of the message.
    pub message: String,
}

impl MessageRecord {
    /// Creates a new record.
    pub fn new(
        timestamp: NaiveDateTime,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            author: author.into(),
            message: message.into(),
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the message length in characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.message.chars().count()
    }
}

impl std::fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%d/%m/%Y %H:%M:%S"),
            self.author,
            self.message
        )
    }
}
