//! Calendar arithmetic for ledger and leaderboard windows.
//!
//! All dates are local calendar dates (`NaiveDate`). Lessons are recorded by
//! calendar day, so every window boundary is computed from the server's local
//! day.

use chrono::{Datelike, Duration, Local, NaiveDate};

use super::error::{LedgerError, LedgerResult};

/// Half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// A calendar month, used for the monthly part of the ledger summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    year: i32,
    month: u32,
}

impl MonthWindow {
    /// Month containing the given day
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM` label
    pub fn parse(label: &str) -> LedgerResult<Self> {
        let invalid = || LedgerError::validation(format!("invalid month '{}', expected YYYY-MM", label));

        let (year, month) = label.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }

    /// Resolve an optional label, defaulting to the month containing `today`
    pub fn resolve(label: Option<&str>, today: NaiveDate) -> LedgerResult<Self> {
        match label {
            Some(label) if !label.trim().is_empty() => Self::parse(label),
            _ => Ok(Self::containing(today)),
        }
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// `[first day of this month, first day of next month)`
    pub fn window(&self) -> LedgerResult<DateWindow> {
        let next = self.next();
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let end = NaiveDate::from_ymd_opt(next.year, next.month, 1);
        match (start, end) {
            (Some(start), Some(end)) => Ok(DateWindow { start, end }),
            _ => Err(LedgerError::validation(format!("month {} is out of range", self.label()))),
        }
    }
}

/// Monday of the week containing `today`; Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let days_since_monday = i64::from(today.weekday().num_days_from_monday());
    today - Duration::days(days_since_monday)
}

/// The server's current local calendar day
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::validation(format!("invalid date '{}', expected YYYY-MM-DD", value)))
}
