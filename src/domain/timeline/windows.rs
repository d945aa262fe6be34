//! Window tiling: partitioning a requested range into calendar windows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{calendar, ValidationError};

/// Width of the tiled windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Month,
    Quarter,
}

impl Granularity {
    /// Returns the wire token for this granularity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
        }
    }

    /// Lenient parse matching the upstream request contract: anything other
    /// than `"quarter"` is treated as monthly.
    pub fn parse_lossy(raw: &str) -> Self {
        if raw == "quarter" {
            Granularity::Quarter
        } else {
            Granularity::Month
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Month
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Calendar label of a window: `YYYY-MM` or `YYYY-Qn`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    /// Label for the month window containing `date`.
    pub fn monthly(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    /// Label for the calendar quarter window containing `date`.
    pub fn quarterly(date: NaiveDate) -> Self {
        Self(format!("{:04}-Q{}", date.year(), calendar::quarter_index(date)))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tiled calendar window. Contiguous, non-overlapping, and always
/// spanning its full calendar unit (never clipped to the request range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Partitions a requested date range into contiguous calendar windows.
pub struct WindowTiler;

impl WindowTiler {
    /// Tiles the inclusive `[range_from, range_to]` month range.
    ///
    /// Quarter windows align to standard calendar quarters, not to the
    /// request's own start month, so the first and last window may extend
    /// beyond the requested range. Windows are emitted in chronological
    /// order; an inverted range yields no windows.
    pub fn tile(
        range_from: &str,
        range_to: &str,
        granularity: Granularity,
    ) -> Result<Vec<Window>, ValidationError> {
        let range_start = Self::parse_range_bound(range_from, "range_from", false)?;
        let range_end = Self::parse_range_bound(range_to, "range_to", true)?;

        let mut windows = Vec::new();
        match granularity {
            Granularity::Quarter => {
                let mut current = calendar::quarter_start(range_start);
                while current <= range_end {
                    let start = current;
                    let end = calendar::quarter_end(current);
                    if end >= range_start && start <= range_end {
                        windows.push(Window {
                            id: WindowId::quarterly(start),
                            start,
                            end,
                        });
                    }
                    current = calendar::add_months(current, 3);
                }
            }
            Granularity::Month => {
                let mut current = range_start;
                while current <= range_end {
                    windows.push(Window {
                        id: WindowId::monthly(current),
                        start: current,
                        end: calendar::month_end(current),
                    });
                    current = calendar::add_months(current, 1);
                }
            }
        }
        Ok(windows)
    }

    fn parse_range_bound(
        value: &str,
        field: &str,
        end: bool,
    ) -> Result<NaiveDate, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let date = calendar::parse_bound(value, end)
            .ok_or_else(|| ValidationError::invalid_format(field, "expected YYYY-MM"))?;
        Ok(if end {
            calendar::month_end(date)
        } else {
            calendar::month_start(date)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn monthly_windows_cover_the_range_contiguously() {
        let windows = WindowTiler::tile("2026-01", "2026-03", Granularity::Month).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].id.as_str(), "2026-01");
        assert_eq!(windows[0].start, ymd(2026, 1, 1));
        assert_eq!(windows[0].end, ymd(2026, 1, 31));
        assert_eq!(windows[1].id.as_str(), "2026-02");
        assert_eq!(windows[2].id.as_str(), "2026-03");
        assert_eq!(windows[2].end, ymd(2026, 3, 31));
    }

    #[test]
    fn monthly_windows_cross_year_boundaries() {
        let windows = WindowTiler::tile("2026-11", "2027-02", Granularity::Month).unwrap();
        let ids: Vec<_> = windows.iter().map(|w| w.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["2026-11", "2026-12", "2027-01", "2027-02"]);
    }

    #[test]
    fn quarter_windows_align_to_calendar_quarters() {
        // Request starts mid-quarter; the window still spans the full quarter.
        let windows = WindowTiler::tile("2026-02", "2026-07", Granularity::Quarter).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].id.as_str(), "2026-Q1");
        assert_eq!(windows[0].start, ymd(2026, 1, 1));
        assert_eq!(windows[0].end, ymd(2026, 3, 31));
        assert_eq!(windows[1].id.as_str(), "2026-Q2");
        assert_eq!(windows[2].id.as_str(), "2026-Q3");
        assert_eq!(windows[2].end, ymd(2026, 9, 30));
    }

    #[test]
    fn partial_overlap_includes_the_whole_window() {
        let windows = WindowTiler::tile("2026-12", "2026-12", Granularity::Quarter).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].id.as_str(), "2026-Q4");
        assert_eq!(windows[0].start, ymd(2026, 10, 1));
        assert_eq!(windows[0].end, ymd(2026, 12, 31));
    }

    #[test]
    fn inverted_range_yields_no_windows() {
        let windows = WindowTiler::tile("2026-06", "2026-01", Granularity::Month).unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn full_date_bounds_round_to_whole_months() {
        let windows = WindowTiler::tile("2026-01-15", "2026-02-10", Granularity::Month).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, ymd(2026, 1, 1));
        assert_eq!(windows[1].end, ymd(2026, 2, 28));
    }

    #[test]
    fn malformed_range_is_rejected() {
        assert!(WindowTiler::tile("", "2026-03", Granularity::Month).is_err());
        assert!(WindowTiler::tile("2026-01", "soon", Granularity::Month).is_err());
    }

    #[test]
    fn granularity_parse_lossy_defaults_to_month() {
        assert_eq!(Granularity::parse_lossy("quarter"), Granularity::Quarter);
        assert_eq!(Granularity::parse_lossy("month"), Granularity::Month);
        assert_eq!(Granularity::parse_lossy("fortnight"), Granularity::Month);
    }
}
