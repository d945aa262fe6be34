//! Calendar math for month-granularity ranges.
//!
//! Cycle and range boundaries arrive as `YYYY-MM` or `YYYY-MM-DD` strings.
//! A `YYYY-MM` start bound means the first day of that month; a `YYYY-MM` end
//! bound means the last day. Anything else is unparseable and the caller is
//! expected to skip the record.

use chrono::{Datelike, NaiveDate};

/// Parses a `YYYY-MM` or `YYYY-MM-DD` boundary string.
///
/// `end` controls how a month-only value is resolved: the first day of the
/// month for a start bound, the last day for an end bound.
pub fn parse_bound(value: &str, end: bool) -> Option<NaiveDate> {
    match value.len() {
        7 => {
            let (year, month) = split_year_month(value)?;
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(if end { month_end(first) } else { first })
        }
        10 => {
            let (rest, day) = value.split_at(7);
            let (year, month) = split_year_month(rest)?;
            let day: u32 = day.strip_prefix('-')?.parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        }
        _ => None,
    }
}

/// Normalizes a boundary string to `YYYY-MM`.
pub fn normalize_iso_ym(value: &str) -> Option<String> {
    let date = parse_bound(value, false)?;
    Some(format!("{:04}-{:02}", date.year(), date.month()))
}

/// Normalizes a boundary string to `YYYY-MM-DD` (month-only values resolve to
/// the first day).
pub fn normalize_iso_ymd(value: &str) -> Option<String> {
    let date = parse_bound(value, false)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Last day of the month containing `date`: the day before the first of the
/// next month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    add_months(date, 1).pred_opt().unwrap_or(date)
}

/// First day of the calendar quarter containing `date` (Jan/Apr/Jul/Oct).
pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = ((date.month() - 1) / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

/// Last day of the calendar quarter containing `date`.
pub fn quarter_end(date: NaiveDate) -> NaiveDate {
    month_end(add_months(quarter_start(date), 2))
}

/// One-based index of the calendar quarter containing `date`.
pub fn quarter_index(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// First day of the month `months` after (or before, if negative) `start`.
pub fn add_months(start: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = start.year() * 12 + start.month() as i32 - 1 + months;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start)
}

fn split_year_month(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}
