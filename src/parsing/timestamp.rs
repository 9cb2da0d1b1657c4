//! Timestamp normalization.
//!
//! Header timestamps are written in whatever order the exporting device's
//! locale uses, so `3/4/25` may be the 4th of March or the 3rd of April.
//! Both interpretations are tried in the order given by [`DatePreference`]
//! and the first one that forms a valid calendar date wins. There is no
//! locale detection and no timezone handling: the result is the naive local
//! time as written.
//!
//! # Accepted shapes
//!
//! - `D/M/YY, H:MM:SS`, `D.M.YYYY, H:MM`, `M/D/YY, H:MM PM`
//! - `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DDTHH:MM[:SS]`
//! - a date alone (midnight)
//!
//! Two-digit years land in the hundred-year window around the current
//! year: in 2026, `75` is 2075 and `77` is 1977.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::config::DatePreference;

/// Date layouts read month-first, two-digit years before four-digit ones.
const MONTH_FIRST: &[&str] = &[
    "%m/%d/%y", "%m/%d/%Y", "%m.%d.%y", "%m.%d.%Y", "%m-%d-%y", "%m-%d-%Y",
];

/// Date layouts read day-first, two-digit years before four-digit ones.
const DAY_FIRST: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y", "%d.%m.%y", "%d.%m.%Y", "%d-%m-%y", "%d-%m-%Y",
];

/// Tried last: a four-digit leading year never fits the layouts above.
const ISO_DATE: &str = "%Y-%m-%d";

/// Time layouts, applied after whitespace and dots are removed
/// (`9:05 p.m.` becomes `9:05pm`).
const TIME_FORMATS: &[&str] = &["%I:%M:%S%p", "%I:%M%p", "%H:%M:%S", "%H:%M"];

/// Normalizes a raw header timestamp, month-first.
///
/// Returns `None` when neither interpretation yields a valid date and time.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::timestamp::normalize_timestamp;
///
/// let ts = normalize_timestamp("1/15/25, 10:30:45").unwrap();
/// assert_eq!(ts.to_string(), "2025-01-15 10:30:45");
///
/// // 15 cannot be a month, so the day-first reading is used
/// let ts = normalize_timestamp("15.01.2024, 9:05 PM").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-15 21:05:00");
///
/// assert!(normalize_timestamp("").is_none());
/// ```
pub fn normalize_timestamp(raw: &str) -> Option<NaiveDateTime> {
    normalize_timestamp_with(raw, DatePreference::MonthFirst)
}

/// Normalizes a raw header timestamp with an explicit day/month preference.
pub fn normalize_timestamp_with(raw: &str, preference: DatePreference) -> Option<NaiveDateTime> {
    let result = parse_at(raw, preference, current_year());
    if result.is_none() && !raw.trim().is_empty() {
        debug!(raw, "timestamp did not normalize");
    }
    result
}

fn current_year() -> i32 {
    static YEAR: OnceLock<i32> = OnceLock::new();
    *YEAR.get_or_init(|| Utc::now().year())
}

fn parse_at(raw: &str, preference: DatePreference, reference_year: i32) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (date_str, time_str) = match raw.split_once([',', 'T', ' ']) {
        Some((date, time)) => (date, time),
        None => (raw, ""),
    };

    let date = parse_date(date_str, preference, reference_year)?;
    let time = parse_time(time_str)?;
    Some(date.and_time(time))
}

fn parse_date(date_str: &str, preference: DatePreference, reference_year: i32) -> Option<NaiveDate> {
    let (preferred, fallback) = match preference {
        DatePreference::MonthFirst => (MONTH_FIRST, DAY_FIRST),
        DatePreference::DayFirst => (DAY_FIRST, MONTH_FIRST),
    };

    preferred
        .iter()
        .chain(fallback)
        .chain(std::iter::once(&ISO_DATE))
        .find_map(|format| {
            let date = NaiveDate::parse_from_str(date_str, format).ok()?;
            if format.ends_with("%y") {
                roll_century(date, reference_year)
            } else {
                Some(date)
            }
        })
}

fn parse_time(time_str: &str) -> Option<NaiveTime> {
    let compact: String = time_str
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != ',')
        .collect();
    if compact.is_empty() {
        return Some(NaiveTime::MIN);
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&compact, format).ok())
}

/// Moves a two-digit year into the window `reference_year - 50 ..
/// reference_year + 50`.
fn roll_century(date: NaiveDate, reference_year: i32) -> Option<NaiveDate> {
    let century = reference_year - reference_year.rem_euclid(100);
    let year = century + date.year().rem_euclid(100);
    let year = if year >= reference_year + 50 {
        year - 100
    } else if year < reference_year - 50 {
        year + 100
    } else {
        year
    };
    date.with_year(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_bracketed_seconds_format() {
        assert_eq!(
            normalize_timestamp("10/1/25, 11:58:38"),
            Some(dt(2025, 10, 1, 11, 58, 38))
        );
    }

    #[test]
    fn test_month_first_wins_when_ambiguous() {
        assert_eq!(normalize_timestamp("3/4/25, 10:00"), Some(dt(2025, 3, 4, 10, 0, 0)));
    }

    #[test]
    fn test_day_first_preference() {
        assert_eq!(
            normalize_timestamp_with("3/4/25, 10:00", DatePreference::DayFirst),
            Some(dt(2025, 4, 3, 10, 0, 0))
        );
    }

    #[test]
    fn test_falls_back_to_day_first() {
        assert_eq!(
            normalize_timestamp("25.12.2024, 18:30"),
            Some(dt(2024, 12, 25, 18, 30, 0))
        );
    }

    #[test]
    fn test_falls_back_to_month_first_under_day_preference() {
        assert_eq!(
            normalize_timestamp_with("12/25/24, 08:00", DatePreference::DayFirst),
            Some(dt(2024, 12, 25, 8, 0, 0))
        );
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(normalize_timestamp("1/15/24, 12:05 AM"), Some(dt(2024, 1, 15, 0, 5, 0)));
        assert_eq!(normalize_timestamp("1/15/24, 12:05 PM"), Some(dt(2024, 1, 15, 12, 5, 0)));
        assert_eq!(normalize_timestamp("1/15/24, 9:05pm"), Some(dt(2024, 1, 15, 21, 5, 0)));
        assert_eq!(
            normalize_timestamp("1/15/24, 10:30:45 AM"),
            Some(dt(2024, 1, 15, 10, 30, 45))
        );
        assert_eq!(normalize_timestamp("1/15/24, 9:05 p.m."), Some(dt(2024, 1, 15, 21, 5, 0)));
    }

    #[test]
    fn test_invalid_twelve_hour() {
        assert!(normalize_timestamp("1/15/24, 13:00 PM").is_none());
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(normalize_timestamp("2024-01-15 10:30"), Some(dt(2024, 1, 15, 10, 30, 0)));
        assert_eq!(
            normalize_timestamp("2024-01-15T10:30:05"),
            Some(dt(2024, 1, 15, 10, 30, 5))
        );
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(normalize_timestamp("15.01.2024"), Some(dt(2024, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn test_two_digit_year_window() {
        let year = |raw| parse_at(raw, DatePreference::MonthFirst, 2026).map(|t| t.year());
        assert_eq!(year("1/1/25, 10:00"), Some(2025));
        assert_eq!(year("1/1/70, 10:00"), Some(2070));
        assert_eq!(year("1/1/75, 10:00"), Some(2075));
        assert_eq!(year("1/1/76, 10:00"), Some(1976));
        assert_eq!(year("1/1/99, 10:00"), Some(1999));
        assert_eq!(year("1/1/00, 10:00"), Some(2000));
    }

    #[test]
    fn test_two_digit_year_window_moves_with_reference() {
        let year = |raw| parse_at(raw, DatePreference::MonthFirst, 1990).map(|t| t.year());
        assert_eq!(year("1/1/25, 10:00"), Some(2025));
        assert_eq!(year("1/1/70, 10:00"), Some(1970));
        assert_eq!(year("1/1/45, 10:00"), Some(1945));
    }

    #[test]
    fn test_four_digit_year_untouched() {
        assert_eq!(
            parse_at("1/1/1970, 10:00", DatePreference::MonthFirst, 2026),
            Some(dt(1970, 1, 1, 10, 0, 0))
        );
    }

    #[test]
    fn test_narrow_space_before_suffix() {
        assert_eq!(
            normalize_timestamp("1/15/24, 9:05\u{202f}PM"),
            Some(dt(2024, 1, 15, 21, 5, 0))
        );
    }

    #[test]
    fn test_failures() {
        for raw in ["", "   ", "yesterday", "13/13/25, 10:00", "1/1/25, 25:00", "1/1/25, 10:61", "31/31/2025"] {
            assert!(normalize_timestamp(raw).is_none(), "unexpected parse: {raw}");
        }
    }

    #[test]
    fn test_feb_29() {
        assert!(normalize_timestamp("29.02.2024, 10:00").is_some());
        assert!(normalize_timestamp("29.02.2023, 10:00").is_none());
    }
}
