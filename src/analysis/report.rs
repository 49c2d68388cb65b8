//! The statistics report over one table.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{
    AuthorCount, AuthorRatio, EmojiCount, KeywordCount, Period, PeriodCount, Trend, WeekdayCount,
    author_counts, author_ratios, count_by_period, emoji_ranking, filter_by_keywords,
    keyword_occurrences, linear_trend, longest_message, weekday_counts,
};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::{MessageRecord, Table};

/// How often a keyword set occurs over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicReport {
    pub name: String,
    /// Messages containing at least one keyword
    pub messages: usize,
    pub per_period: Vec<PeriodCount>,
    pub trend: Option<Trend>,
}

/// Who uses a keyword set, and which words.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyReport {
    pub name: String,
    pub messages: usize,
    pub by_author: Vec<AuthorCount>,
    pub ratio_by_author: Vec<AuthorRatio>,
    pub top_author: Option<AuthorCount>,
    pub top_keywords: Vec<KeywordCount>,
}

/// Group statistics computed from a parsed table.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::Report;
/// use chatlens::config::AnalysisConfig;
/// use chatlens::parser::ChatParser;
///
/// let parsed = ChatParser::new().parse_str(
///     "[01/02/2021, 09:00:00] Ana: Já fez o PCR?\n\
///      [01/02/2021, 09:05:00] Bia: Porra, ainda não 😂\n",
/// )?;
/// let report = Report::build(&parsed.table, &AnalysisConfig::default())?;
///
/// assert_eq!(report.total_messages, 2);
/// assert_eq!(report.pandemic.messages, 1);
/// assert_eq!(report.profanity.top_author.unwrap().author, "Bia");
/// assert_eq!(report.top_emojis[0].emoji, "😂");
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_messages: usize,
    pub first_message_at: Option<NaiveDateTime>,
    pub last_message_at: Option<NaiveDateTime>,
    pub period: Period,
    pub activity: TopicReport,
    pub weekdays: Vec<WeekdayCount>,
    pub authors: Vec<AuthorCount>,
    pub pandemic: TopicReport,
    pub profanity: VocabularyReport,
    pub longest_message: Option<MessageRecord>,
    pub top_emojis: Vec<EmojiCount>,
}

impl Report {
    /// Computes every statistic for `table`.
    ///
    /// Fails only if a configured keyword set cannot be compiled.
    pub fn build(table: &Table, config: &AnalysisConfig) -> Result<Self> {
        let pandemic_matcher = config.pandemic.matcher()?;
        let profanity_matcher = config.profanity.matcher()?;

        let activity = topic(table, "messages", config.period);

        let pandemic_rows = filter_by_keywords(table, &pandemic_matcher);
        let pandemic = topic(&pandemic_rows, &config.pandemic.name, config.period);

        let profane_rows = filter_by_keywords(table, &profanity_matcher);
        let by_author = author_counts(&profane_rows);
        let profanity = VocabularyReport {
            name: config.profanity.name.clone(),
            messages: profane_rows.len(),
            top_author: by_author.first().cloned(),
            by_author,
            ratio_by_author: author_ratios(table, &profane_rows),
            top_keywords: keyword_occurrences(&profane_rows, &profanity_matcher),
        };

        let mut top_emojis = emoji_ranking(table);
        top_emojis.truncate(config.top_emojis);

        let span = table.time_span();
        Ok(Self {
            total_messages: table.len(),
            first_message_at: span.map(|(first, _)| first),
            last_message_at: span.map(|(_, last)| last),
            period: config.period,
            activity,
            weekdays: weekday_counts(table),
            authors: author_counts(table),
            pandemic,
            profanity,
            longest_message: longest_message(table).cloned(),
            top_emojis,
        })
    }
}

fn topic(table: &Table, name: &str, period: Period) -> TopicReport {
    let per_period = count_by_period(table, period);
    TopicReport {
        name: name.to_string(),
        messages: table.len(),
        trend: linear_trend(&per_period),
        per_period,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Messages: {}", self.total_messages)?;
        if let (Some(first), Some(last)) = (self.first_message_at, self.last_message_at) {
            writeln!(
                f,
                "📅 Span: {} - {}",
                first.format("%d/%m/%Y %H:%M:%S"),
                last.format("%d/%m/%Y %H:%M:%S")
            )?;
        }

        if !self.authors.is_empty() {
            writeln!(f, "\n👥 Authors:")?;
            for a in &self.authors {
                writeln!(f, "   {:<24} {}", a.author, a.count)?;
            }
        }

        if !self.activity.per_period.is_empty() {
            writeln!(f, "\n🗓  Messages per {}:", self.period)?;
            for p in &self.activity.per_period {
                writeln!(f, "   {}  {}", p.period, p.count)?;
            }
        }

        if !self.weekdays.is_empty() {
            writeln!(f, "\n📆 Weekdays:")?;
            for w in &self.weekdays {
                writeln!(f, "   {}  {}", w.weekday, w.count)?;
            }
        }

        writeln!(
            f,
            "\n🦠 {} messages: {}",
            self.pandemic.name, self.pandemic.messages
        )?;
        if let Some(trend) = self.pandemic.trend {
            writeln!(f, "   trend: {:+.3} per day", trend.slope_per_day)?;
        }

        writeln!(
            f,
            "\n🤬 {} messages: {}",
            self.profanity.name, self.profanity.messages
        )?;
        if let Some(top) = &self.profanity.top_author {
            writeln!(f, "   top author: {} ({})", top.author, top.count)?;
        }
        for k in &self.profanity.top_keywords {
            writeln!(f, "   {:<24} {}", k.keyword, k.count)?;
        }

        if let Some(longest) = &self.longest_message {
            writeln!(
                f,
                "\n📏 Longest message: {} chars by {} at {}",
                longest.char_count(),
                longest.author,
                longest.timestamp.format("%d/%m/%Y %H:%M:%S")
            )?;
        }

        if !self.top_emojis.is_empty() {
            writeln!(f, "\n😀 Top emojis:")?;
            for e in &self.top_emojis {
                writeln!(f, "   {} {:<28} {}", e.emoji, e.name, e.count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::KeywordSet;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn sample() -> Table {
        Table::new(vec![
            MessageRecord::new(at(1, 4), "Ana", "A pandemia não acaba"),
            MessageRecord::new(at(1, 5), "Bia", "porra, de novo quarentena 😂"),
            MessageRecord::new(at(2, 1), "Ana", "bom dia 😂😂"),
            MessageRecord::new(at(2, 2), "Caio", "merda de lockdown 🎉"),
            MessageRecord::new(at(3, 1), "Bia", "PORRA"),
        ])
    }

    #[test]
    fn test_build_report() {
        let report = Report::build(&sample(), &AnalysisConfig::default()).unwrap();

        assert_eq!(report.total_messages, 5);
        assert_eq!(report.first_message_at, Some(at(1, 4)));
        assert_eq!(report.last_message_at, Some(at(3, 1)));
        assert_eq!(report.authors[0].author, "Ana");
        assert_eq!(report.activity.per_period.len(), 3);

        assert_eq!(report.pandemic.messages, 3);
        assert_eq!(report.pandemic.per_period.len(), 2);

        assert_eq!(report.profanity.messages, 3);
        let top = report.profanity.top_author.as_ref().unwrap();
        assert_eq!((top.author.as_str(), top.count), ("Bia", 2));
        assert_eq!(report.profanity.ratio_by_author[0].author, "Bia");
        assert_eq!(report.profanity.top_keywords[0].keyword, "porra");
        assert_eq!(report.profanity.top_keywords[0].count, 2);

        assert_eq!(report.top_emojis[0].emoji, "😂");
        assert_eq!(report.top_emojis[0].count, 3);
        assert_eq!(
            report.longest_message.as_ref().unwrap().message,
            "porra, de novo quarentena 😂"
        );
    }

    #[test]
    fn test_top_keywords_use_the_filter_list() {
        let table = Table::new(vec![
            MessageRecord::new(at(1, 4), "Ana", "corno de cuidado"),
            MessageRecord::new(at(1, 5), "Bia", "fude tudo"),
        ]);
        let report = Report::build(&table, &AnalysisConfig::default()).unwrap();
        let keywords: Vec<(&str, usize)> = report
            .profanity
            .top_keywords
            .iter()
            .map(|k| (k.keyword.as_str(), k.count))
            .collect();
        assert_eq!(keywords, [("corno", 1), ("fude", 1)]);
        assert_eq!(report.profanity.messages, 2);
    }

    #[test]
    fn test_empty_table_report() {
        let report = Report::build(&Table::default(), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.total_messages, 0);
        assert!(report.first_message_at.is_none());
        assert!(report.profanity.top_author.is_none());
        assert!(report.longest_message.is_none());
        assert!(report.activity.trend.is_none());
        assert!(report.to_string().contains("Messages: 0"));
    }

    #[test]
    fn test_custom_keywords_and_limits() {
        let config = AnalysisConfig::new()
            .with_pandemic(KeywordSet::new("greeting", ["bom dia"]))
            .with_top_emojis(1)
            .with_period(Period::Day);
        let report = Report::build(&sample(), &config).unwrap();
        assert_eq!(report.pandemic.name, "greeting");
        assert_eq!(report.pandemic.messages, 1);
        assert_eq!(report.top_emojis.len(), 1);
        assert_eq!(report.activity.per_period.len(), 5);
    }

    #[test]
    fn test_text_summary() {
        let report = Report::build(&sample(), &AnalysisConfig::default()).unwrap();
        let text = report.to_string();
        assert!(text.contains("Messages: 5"));
        assert!(text.contains("top author: Bia (2)"));
        assert!(text.contains("face with tears of joy"));
    }

    #[test]
    fn test_report_serializes() {
        let report = Report::build(&sample(), &AnalysisConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_messages"], 5);
        assert_eq!(json["weekdays"][0]["weekday"], "Mon");
        assert_eq!(json["period"], "month");
    }
}
