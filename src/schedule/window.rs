use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ScheduleError;

/// Inclusive calendar date range over which occurrences are generated and
/// aggregated. A window with `start == end` covers exactly one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScheduleError> {
        if end < start {
            return Err(ScheduleError::InvalidWindow(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Full-month window for the given year and month.
    pub fn month(year: i32, month: u32) -> Result<Self, ScheduleError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ScheduleError::InvalidWindow(format!("no such month: {year}-{month:02}"))
        })?;
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .unwrap_or(start);
        Ok(Self { start, end })
    }

    /// Full-year window, January 1 through December 31.
    pub fn year(year: i32) -> Result<Self, ScheduleError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| ScheduleError::InvalidWindow(format!("year {year} out of range")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(start);
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Month keys overlapping this window, in calendar order.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut keys = Vec::new();
        let mut key = MonthKey::from_date(self.start);
        let last = MonthKey::from_date(self.end);
        while key <= last {
            keys.push(key);
            key = key.next();
        }
        keys
    }

    /// Every date in the window, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }

    /// Splits into `[start, mid]` and `[mid + 1 day, end]`. Returns `None`
    /// when `mid` leaves either side empty.
    pub fn split_at(&self, mid: NaiveDate) -> Option<(Self, Self)> {
        if mid < self.start || mid >= self.end {
            return None;
        }
        let head = Self {
            start: self.start,
            end: mid,
        };
        let tail = Self {
            start: mid + Duration::days(1),
            end: self.end,
        };
        Some((head, tail))
    }
}

/// Ordered year-month identifier used as a monthly aggregation key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The full-month window this key names.
    pub fn window(&self) -> DateWindow {
        let start = self.first_day();
        let end = NaiveDate::from_ymd_opt(self.year, self.month, days_in_month(self.year, self.month))
            .unwrap_or(start);
        DateWindow { start, end }
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
