//! Statistics over a parsed [`Table`](crate::Table).
//!
//! Every function here is a pure transformation of a table:
//!
//! - [`keywords`] - keyword sets, matching and keyword filtering
//! - [`stats`] - activity per period, weekday and author, trends
//! - [`emoji`] - emoji frequency
//! - [`report`] - everything above bundled into one [`Report`]

pub mod emoji;
pub mod keywords;
pub mod report;
pub mod stats;

pub use emoji::{EmojiCount, emoji_ranking, extract_emojis};
pub use keywords::{
    KeywordCount, KeywordMatcher, KeywordSet, filter_by_keywords, keyword_occurrences,
};
pub use report::{Report, TopicReport, VocabularyReport};
pub use stats::{
    AuthorCount, AuthorRatio, Period, PeriodCount, Trend, WeekdayCount, author_counts,
    author_ratios, count_by_period, linear_trend, longest_message, top_author, weekday_counts,
};
