use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The single-day range covering `date`.
pub fn day_of(date: NaiveDate) -> DateRange {
    DateRange::new(date, date)
}

/// The Monday-start week containing `date`, inclusive of its Sunday.
pub fn week_of(date: NaiveDate) -> DateRange {
    let back = date.weekday().num_days_from_monday() as i64;
    let start = date - Duration::days(back);
    DateRange::new(start, start + Duration::days(6))
}

/// The calendar month containing `date`.
pub fn month_of(date: NaiveDate) -> DateRange {
    let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap();
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1).unwrap()
    };
    DateRange::new(start, next_month - Duration::days(1))
}
