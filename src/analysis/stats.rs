//! Activity statistics over a [`Table`].

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::{MessageRecord, Table};

/// Bucket size for time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Calendar day
    Day,
    /// Calendar month
    #[default]
    Month,
}

impl Period {
    /// Returns the first day of the bucket containing `timestamp`.
    pub fn start_of(self, timestamp: NaiveDateTime) -> NaiveDate {
        let date = timestamp.date();
        match self {
            Period::Day => date,
            Period::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Day => write!(f, "day"),
            Period::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCount {
    /// First day of the bucket
    pub period: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: Weekday,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

/// Share of an author's messages that matched some classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRatio {
    pub author: String,
    pub messages: usize,
    pub matches: usize,
    /// `matches / messages`, in `0.0..=1.0`
    pub ratio: f64,
}

/// Least-squares line through a time series.
///
/// `x` is measured in days since the first bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub origin: NaiveDate,
    pub slope_per_day: f64,
    pub intercept: f64,
}

impl Trend {
    /// Evaluates the fitted line at `date`.
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        let x = (date - self.origin).num_days() as f64;
        self.intercept + self.slope_per_day * x
    }
}

/// Counts messages per period, oldest bucket first.
///
/// Buckets with no messages are omitted.
pub fn count_by_period(table: &Table, period: Period) -> Vec<PeriodCount> {
    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in table {
        *buckets.entry(period.start_of(record.timestamp)).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(period, count)| PeriodCount { period, count })
        .collect()
}

/// Counts messages per weekday, Monday first.
///
/// Weekdays with no messages are omitted.
pub fn weekday_counts(table: &Table) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for record in table {
        counts[record.timestamp.weekday().num_days_from_monday() as usize] += 1;
    }

    let mut day = Weekday::Mon;
    let mut out = Vec::new();
    for count in counts {
        if count > 0 {
            out.push(WeekdayCount { weekday: day, count });
        }
        day = day.succ();
    }
    out
}

/// Counts messages per author, most active first, ties by name.
pub fn author_counts(table: &Table) -> Vec<AuthorCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in table {
        *counts.entry(record.author.as_str()).or_default() += 1;
    }
    sorted_author_counts(counts)
}

/// Returns the most active author, or `None` for an empty table.
pub fn top_author(table: &Table) -> Option<AuthorCount> {
    author_counts(table).into_iter().next()
}

/// Relates each author's `matched` messages to everything they wrote in `all`.
///
/// Authors with no match get a ratio of zero. Sorted by ratio, highest
/// first, ties by name.
pub fn author_ratios(all: &Table, matched: &Table) -> Vec<AuthorRatio> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for record in all {
        *totals.entry(record.author.as_str()).or_default() += 1;
    }
    let mut hits: HashMap<&str, usize> = HashMap::new();
    for record in matched {
        *hits.entry(record.author.as_str()).or_default() += 1;
    }

    let mut out: Vec<AuthorRatio> = totals
        .into_iter()
        .map(|(author, messages)| {
            let matches = hits.get(author).copied().unwrap_or(0);
            AuthorRatio {
                author: author.to_string(),
                messages,
                matches,
                ratio: matches as f64 / messages as f64,
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.ratio
            .total_cmp(&a.ratio)
            .then_with(|| a.author.cmp(&b.author))
    });
    out
}

/// Returns the message with the most characters; the earliest row wins ties.
pub fn longest_message(table: &Table) -> Option<&MessageRecord> {
    let mut best: Option<(&MessageRecord, usize)> = None;
    for record in table {
        let len = record.char_count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((record, len));
        }
    }
    best.map(|(record, _)| record)
}

/// Fits an ordinary least-squares line through a period series.
///
/// Returns `None` with fewer than two points.
pub fn linear_trend(points: &[PeriodCount]) -> Option<Trend> {
    let origin = points.iter().map(|p| p.period).min()?;
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let xs: Vec<f64> = points
        .iter()
        .map(|p| (p.period - origin).num_days() as f64)
        .collect();
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.count as f64).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, p) in xs.iter().zip(points) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (p.count as f64 - mean_y);
    }
    if sxx.abs() < f64::EPSILON {
        return None;
    }

    let slope = sxy / sxx;
    Some(Trend {
        origin,
        slope_per_day: slope,
        intercept: mean_y - slope * mean_x,
    })
}

fn sorted_author_counts(counts: HashMap<&str, usize>) -> Vec<AuthorCount> {
    let mut out: Vec<AuthorCount> = counts
        .into_iter()
        .map(|(author, count)| AuthorCount {
            author: author.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.author.cmp(&b.author)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Table {
        Table::new(vec![
            // 2021-02-01 is a Monday
            MessageRecord::new(at(2021, 2, 1), "Ana", "Bom dia"),
            MessageRecord::new(at(2021, 2, 1), "Bia", "Bom dia, tudo bem?"),
            MessageRecord::new(at(2021, 2, 3), "Ana", "Oi"),
            MessageRecord::new(at(2021, 3, 7), "Caio", "Domingo"),
            MessageRecord::new(at(2021, 1, 15), "Bia", "Mensagem fora de ordem"),
        ])
    }

    #[test]
    fn test_count_by_month() {
        let counts = count_by_period(&sample(), Period::Month);
        assert_eq!(
            counts,
            vec![
                PeriodCount { period: date(2021, 1, 1), count: 1 },
                PeriodCount { period: date(2021, 2, 1), count: 3 },
                PeriodCount { period: date(2021, 3, 1), count: 1 },
            ]
        );
    }

    #[test]
    fn test_count_by_day() {
        let counts = count_by_period(&sample(), Period::Day);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[1], PeriodCount { period: date(2021, 2, 1), count: 2 });
    }

    #[test]
    fn test_weekday_counts() {
        let counts = weekday_counts(&sample());
        assert_eq!(
            counts,
            vec![
                WeekdayCount { weekday: Weekday::Mon, count: 2 },
                WeekdayCount { weekday: Weekday::Wed, count: 1 },
                WeekdayCount { weekday: Weekday::Fri, count: 1 },
                WeekdayCount { weekday: Weekday::Sun, count: 1 },
            ]
        );
    }

    #[test]
    fn test_author_counts_ties_by_name() {
        let counts = author_counts(&sample());
        let names: Vec<_> = counts.iter().map(|c| c.author.as_str()).collect();
        assert_eq!(names, ["Ana", "Bia", "Caio"]);
        assert_eq!(counts[0].count, 2);
        assert_eq!(top_author(&sample()).unwrap().author, "Ana");
        assert!(top_author(&Table::default()).is_none());
    }

    #[test]
    fn test_author_ratios() {
        let all = sample();
        let matched = all.filter(|r| r.message.contains("Bom dia"));
        let ratios = author_ratios(&all, &matched);

        assert_eq!(ratios[0].author, "Ana");
        assert!((ratios[0].ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(ratios[1].author, "Bia");
        assert_eq!(ratios[2].author, "Caio");
        assert_eq!(ratios[2].matches, 0);
        assert!(ratios[2].ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn test_longest_message_first_wins() {
        let table = Table::new(vec![
            MessageRecord::new(at(2021, 1, 1), "Ana", "ação"),
            MessageRecord::new(at(2021, 1, 2), "Bia", "abcd"),
            MessageRecord::new(at(2021, 1, 3), "Caio", "abc"),
        ]);
        assert_eq!(longest_message(&table).unwrap().author, "Ana");
        assert!(longest_message(&Table::default()).is_none());
    }

    #[test]
    fn test_linear_trend() {
        let points = vec![
            PeriodCount { period: date(2021, 1, 1), count: 1 },
            PeriodCount { period: date(2021, 1, 2), count: 3 },
            PeriodCount { period: date(2021, 1, 3), count: 5 },
        ];
        let trend = linear_trend(&points).unwrap();
        assert!((trend.slope_per_day - 2.0).abs() < 1e-9);
        assert!((trend.intercept - 1.0).abs() < 1e-9);
        assert!((trend.value_at(date(2021, 1, 4)) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_trend_needs_two_points() {
        assert!(linear_trend(&[]).is_none());
        let one = [PeriodCount { period: date(2021, 1, 1), count: 4 }];
        assert!(linear_trend(&one).is_none());
    }

    #[test]
    fn test_period_serde() {
        assert_eq!(serde_json::to_string(&Period::Day).unwrap(), r#""day""#);
        let parsed: Period = serde_json::from_str(r#""month""#).unwrap();
        assert_eq!(parsed, Period::Month);
    }
}
