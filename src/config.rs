//! Configuration types for parsing and analysis.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`FilterConfig`] - which assembled records are dropped from the table
//! - [`AnalysisConfig`] - keyword sets and knobs for the statistics report
//! - [`ChatlensConfig`] - both of the above, loadable from a JSON file
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::FilterConfig;
//! use chatlens::parser::ChatParser;
//!
//! let config = FilterConfig::new()
//!     .with_include_system_events(true)
//!     .with_exclude_self_author(false);
//!
//! let parser = ChatParser::with_config(config);
//! ```

#[cfg(feature = "json-output")]
use std::fs;
#[cfg(feature = "json-output")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{KeywordSet, Period};
#[cfg(feature = "json-output")]
use crate::error::{ChatlensError, Result};

/// Phrases the exporting app writes for group metadata notifications.
///
/// The last entry is U+200E (LEFT-TO-RIGHT MARK), which the app prepends to
/// every automatically generated line.
pub const DEFAULT_SYSTEM_EVENT_PHRASES: &[&str] = &[
    "criou este grupo",
    "mudou o nome do grupo para",
    "mudou a descrição do grupo",
    "mudou a imagem do grupo",
    "são protegidas com a criptografia de ponta a ponta",
    "foi adicionado(a)",
    "\u{200e}",
];

/// Placeholders written instead of omitted media.
pub const DEFAULT_MEDIA_PLACEHOLDERS: &[&str] = &["figurinha omitida"];

/// Author tokens that identify the person who exported the chat.
pub const DEFAULT_SELF_AUTHOR_TOKENS: &[&str] = &["você"];

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Configuration for the record filter.
///
/// Two variants of the source application differ only in strictness, so
/// both are expressed as toggles over one filter:
///
/// | Preset | System events | Self author |
/// |--------|---------------|-------------|
/// | [`strict`](Self::strict) (default) | dropped | dropped |
/// | [`lenient`](Self::lenient) | kept | kept |
///
/// Media placeholders are always dropped.
///
/// # Example
///
/// ```rust
/// use chatlens::config::FilterConfig;
///
/// let config = FilterConfig::new()
///     .with_media_placeholders(["figurinha omitida", "imagem ocultada"]);
/// assert_eq!(config.media_placeholders.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Keep system notifications in the table (default: false)
    pub include_system_events: bool,

    /// Drop messages whose author is the exporting user (default: true)
    pub exclude_self_author: bool,

    /// Substrings marking system notifications
    pub system_event_phrases: Vec<String>,

    /// Substrings marking omitted media
    pub media_placeholders: Vec<String>,

    /// Substrings of the author field naming the exporting user
    pub self_author_tokens: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_system_events: false,
            exclude_self_author: true,
            system_event_phrases: to_owned_list(DEFAULT_SYSTEM_EVENT_PHRASES),
            media_placeholders: to_owned_list(DEFAULT_MEDIA_PLACEHOLDERS),
            self_author_tokens: to_owned_list(DEFAULT_SELF_AUTHOR_TOKENS),
        }
    }
}

impl FilterConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops system events and self-authored messages.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Keeps system events and self-authored messages.
    pub fn lenient() -> Self {
        Self {
            include_system_events: true,
            exclude_self_author: false,
            ..Self::default()
        }
    }

    /// Sets whether system events stay in the table.
    #[must_use]
    pub fn with_include_system_events(mut self, include: bool) -> Self {
        self.include_system_events = include;
        self
    }

    /// Sets whether self-authored messages are dropped.
    #[must_use]
    pub fn with_exclude_self_author(mut self, exclude: bool) -> Self {
        self.exclude_self_author = exclude;
        self
    }

    /// Replaces the system event phrases.
    #[must_use]
    pub fn with_system_event_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_event_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the media placeholders.
    #[must_use]
    pub fn with_media_placeholders<I, S>(mut self, placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_placeholders = placeholders.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the self-author tokens.
    #[must_use]
    pub fn with_self_author_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_author_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration for the statistics report.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::{KeywordSet, Period};
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_pandemic(KeywordSet::new("flu", ["gripe", "febre"]))
///     .with_period(Period::Day)
///     .with_top_emojis(5);
/// assert_eq!(config.top_emojis, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Keywords marking pandemic-related messages
    pub pandemic: KeywordSet,

    /// Keywords marking profanity
    pub profanity: KeywordSet,

    /// Number of emojis listed in the report (default: 10)
    pub top_emojis: usize,

    /// Bucket size for time series (default: month)
    pub period: Period,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pandemic: KeywordSet::pandemic(),
            profanity: KeywordSet::profanity(),
            top_emojis: 10,
            period: Period::Month,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pandemic keyword set.
    #[must_use]
    pub fn with_pandemic(mut self, keywords: KeywordSet) -> Self {
        self.pandemic = keywords;
        self
    }

    /// Sets the profanity keyword set.
    #[must_use]
    pub fn with_profanity(mut self, keywords: KeywordSet) -> Self {
        self.profanity = keywords;
        self
    }

    /// Sets how many emojis the report lists.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Sets the bucket size for time series.
    #[must_use]
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }
}

/// Complete configuration, as read from a JSON file.
///
/// Missing sections and fields fall back to their defaults:
///
/// ```rust
/// # #[cfg(feature = "json-output")]
/// # fn main() -> chatlens::Result<()> {
/// use chatlens::config::ChatlensConfig;
///
/// let config = ChatlensConfig::from_json_str(
///     r#"{"filter": {"include_system_events": true}, "analysis": {"top_emojis": 3}}"#,
/// )?;
/// assert!(config.filter.include_system_events);
/// assert!(config.filter.exclude_self_author);
/// assert_eq!(config.analysis.top_emojis, 3);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "json-output"))]
/// # fn main() {}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatlensConfig {
    /// Record filter settings
    pub filter: FilterConfig,

    /// Report settings
    pub analysis: AnalysisConfig,
}

#[cfg(feature = "json-output")]
impl ChatlensConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ChatlensError::config(path, e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ChatlensError::config(path, e.to_string()))
    }
}
