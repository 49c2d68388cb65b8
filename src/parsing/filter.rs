//! Record filtering.
//!
//! Assembled records are checked against the substring rules of a
//! [`FilterConfig`]. Matching is case-insensitive and not word-bounded.

use crate::MessageRecord;
use crate::config::FilterConfig;

/// Outcome of checking one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The record goes into the table.
    Keep,
    /// The message is an automated group notification.
    SystemEvent,
    /// The message is an omitted-media placeholder.
    Media,
    /// The author is the exporting user.
    SelfAuthor,
}

impl Verdict {
    pub fn is_keep(self) -> bool {
        self == Verdict::Keep
    }
}

/// Decides which records stay in the table.
///
/// Patterns are lowercased once at construction.
///
/// # Example
///
/// ```rust
/// use chatlens::MessageRecord;
/// use chatlens::config::FilterConfig;
/// use chatlens::parsing::{RecordFilter, Verdict};
/// use chrono::NaiveDateTime;
///
/// let filter = RecordFilter::new(&FilterConfig::default());
/// let ts = NaiveDateTime::default();
///
/// let sticker = MessageRecord::new(ts, "Ana", "Figurinha omitida");
/// assert_eq!(filter.verdict(&sticker), Verdict::Media);
///
/// let me = MessageRecord::new(ts, "Você", "Oi");
/// assert_eq!(filter.verdict(&me), Verdict::SelfAuthor);
/// ```
#[derive(Debug, Clone)]
pub struct RecordFilter {
    system_event_phrases: Option<Vec<String>>,
    media_placeholders: Vec<String>,
    self_author_tokens: Option<Vec<String>>,
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

impl RecordFilter {
    /// Builds a filter from its configuration.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            system_event_phrases: (!config.include_system_events)
                .then(|| lowercase_all(&config.system_event_phrases)),
            media_placeholders: lowercase_all(&config.media_placeholders),
            self_author_tokens: config
                .exclude_self_author
                .then(|| lowercase_all(&config.self_author_tokens)),
        }
    }

    /// Checks a record. The first matching rule decides the verdict.
    pub fn verdict(&self, record: &MessageRecord) -> Verdict {
        let message = record.message.to_lowercase();

        if let Some(phrases) = &self.system_event_phrases {
            if contains_any(&message, phrases) {
                return Verdict::SystemEvent;
            }
        }

        if contains_any(&message, &self.media_placeholders) {
            return Verdict::Media;
        }

        if let Some(tokens) = &self.self_author_tokens {
            if contains_any(&record.author.to_lowercase(), tokens) {
                return Verdict::SelfAuthor;
            }
        }

        Verdict::Keep
    }

    /// Shorthand for `verdict(record).is_keep()`.
    pub fn keeps(&self, record: &MessageRecord) -> bool {
        self.verdict(record).is_keep()
    }
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
