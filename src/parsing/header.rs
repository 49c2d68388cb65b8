//! Line classification.
//!
//! A line starts a new message only when it begins with a bracketed
//! timestamp followed by an author:
//!
//! ```text
//! [01/02/2021, 09:00:00] Ana: Bom dia
//! [1/2/2021 09:00:00] Ana: Bom dia
//! ```
//!
//! Everything else is a continuation of the previous message.

use std::sync::LazyLock;

use regex::Regex;

/// Header layout of the export.
///
/// Groups: date, separator (`,` or whitespace), time, author (non-greedy,
/// up to the first `": "`), message fragment.
pub const HEADER_PATTERN: &str =
    r"^\[(\d{1,2}/\d{1,2}/\d{4})([,\s]) (\d{2}:\d{2}:\d{2})\] (.*?): (.*)";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid"));

/// Separator written between the date and the time of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `[01/02/2021, 09:00:00]`
    Comma,
    /// `[01/02/2021\u{a0} 09:00:00]`: any whitespace character, then the space
    Space,
}

/// Fields captured from a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader<'a> {
    pub date_text: &'a str,
    pub separator: Separator,
    pub time_text: &'a str,
    pub author: &'a str,
    pub message_fragment: &'a str,
}

/// Classification of a decoded, non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line opens a new message.
    Header(ParsedHeader<'a>),
    /// The line belongs to the message before it.
    Continuation,
}

impl LineKind<'_> {
    pub fn is_header(&self) -> bool {
        matches!(self, LineKind::Header(_))
    }
}

/// Classifies one decoded line.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::{LineKind, Separator, classify_line};
///
/// let LineKind::Header(header) = classify_line("[01/02/2021, 09:00:00] Ana: Bom dia: tudo bem?") else {
///     panic!("expected a header");
/// };
/// assert_eq!(header.author, "Ana");
/// assert_eq!(header.separator, Separator::Comma);
/// assert_eq!(header.message_fragment, "Bom dia: tudo bem?");
///
/// assert_eq!(classify_line("continuação da mensagem"), LineKind::Continuation);
/// ```
pub fn classify_line(line: &str) -> LineKind<'_> {
    let Some(caps) = HEADER_RE.captures(line) else {
        return LineKind::Continuation;
    };

    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let separator = if group(2) == "," {
        Separator::Comma
    } else {
        Separator::Space
    };

    LineKind::Header(ParsedHeader {
        date_text: group(1),
        separator,
        time_text: group(3),
        author: group(4),
        message_fragment: group(5),
    })
}
