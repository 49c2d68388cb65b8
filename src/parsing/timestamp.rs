//! Timestamp normalization.
//!
//! Exports write the header date and time in one of two layouts. Both map to
//! the same [`NaiveDateTime`]. Day always comes before month.

use chrono::NaiveDateTime;

use super::header::Separator;
use crate::error::{ChatlensError, Result};

/// Accepted date-time layouts, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `01/02/2021 09:00:00`
    SpaceSeparated,
    /// `01/02/2021, 09:00:00`
    CommaSeparated,
}

impl DateFormat {
    /// Returns the chrono format string.
    pub fn parse_format(self) -> &'static str {
        match self {
            DateFormat::SpaceSeparated => "%d/%m/%Y %H:%M:%S",
            DateFormat::CommaSeparated => "%d/%m/%Y, %H:%M:%S",
        }
    }

    /// Returns all formats in the order they are tried.
    pub fn all() -> &'static [DateFormat] {
        &[DateFormat::SpaceSeparated, DateFormat::CommaSeparated]
    }
}

/// Rebuilds the date-time text of a header in its original phrasing.
pub fn join_date_time(date_text: &str, separator: Separator, time_text: &str) -> String {
    match separator {
        Separator::Comma => format!("{date_text}, {time_text}"),
        Separator::Space => format!("{date_text} {time_text}"),
    }
}

/// Parses a combined date-time text under either accepted layout.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::normalize_timestamp;
///
/// let a = normalize_timestamp("01/02/2021 09:00:00")?;
/// let b = normalize_timestamp("01/02/2021, 09:00:00")?;
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "2021-02-01 09:00:00");
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub fn normalize_timestamp(text: &str) -> Result<NaiveDateTime> {
    DateFormat::all()
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format.parse_format()).ok())
        .ok_or_else(|| ChatlensError::timestamp(text))
}

/// Parses the date and time captured from a header.
pub fn parse_header_timestamp(
    date_text: &str,
    separator: Separator,
    time_text: &str,
) -> Result<NaiveDateTime> {
    normalize_timestamp(&join_date_time(date_text, separator, time_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expected(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_both_layouts_normalize_to_same_value() {
        let space = normalize_timestamp("01/02/2021 09:00:00").unwrap();
        let comma = normalize_timestamp("01/02/2021, 09:00:00").unwrap();
        assert_eq!(space, comma);
        assert_eq!(space, expected(2021, 2, 1, 9, 0, 0));
    }

    #[test]
    fn test_day_before_month() {
        let ts = normalize_timestamp("13/12/2020 23:59:59").unwrap();
        assert_eq!(ts, expected(2020, 12, 13, 23, 59, 59));
        assert!(normalize_timestamp("12/13/2020 23:59:59").is_err());
    }

    #[test]
    fn test_single_digit_day_and_month() {
        let ts = parse_header_timestamp("1/2/2021", Separator::Comma, "07:05:03").unwrap();
        assert_eq!(ts, expected(2021, 2, 1, 7, 5, 3));
    }

    #[test]
    fn test_header_separators() {
        assert_eq!(
            join_date_time("01/02/2021", Separator::Comma, "09:00:00"),
            "01/02/2021, 09:00:00"
        );
        assert_eq!(
            join_date_time("01/02/2021", Separator::Space, "09:00:00"),
            "01/02/2021 09:00:00"
        );
        assert_eq!(
            parse_header_timestamp("01/02/2021", Separator::Space, "09:00:00").unwrap(),
            parse_header_timestamp("01/02/2021", Separator::Comma, "09:00:00").unwrap()
        );
    }

    #[test]
    fn test_invalid_values_are_errors() {
        for text in [
            "32/01/2021 09:00:00",
            "01/13/2021 09:00:00",
            "29/02/2021 09:00:00",
            "01/02/2021 24:00:00",
            "01/02/2021 09:60:00",
            "",
        ] {
            let err = normalize_timestamp(text).unwrap_err();
            assert!(err.is_timestamp(), "{text}");
        }
    }

    #[test]
    fn test_leap_day() {
        assert!(normalize_timestamp("29/02/2020, 12:00:00").is_ok());
    }
}
