//! Calendar rules used by the proration calculator.
//!
//! Month lengths follow the proleptic Gregorian calendar: a year is a leap
//! year when it is divisible by 4, except for centuries that are not
//! divisible by 400.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ProrationError, Result};

/// Wire format accepted for settlement dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    (1..=12)
        .contains(&month)
        .then(|| month_length(year, month))
}

/// Length of a month already known to be within `1..=12`.
fn month_length(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Clock abstracts access to the current timestamp so defaults stay deterministic in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The day on which ownership transfers; the dividing line for cost allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementDate(NaiveDate);

impl SettlementDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                ProrationError::InvalidDate(format!("{year:04}-{month:02}-{day:02} does not exist"))
            })
    }

    /// Parses an ISO `YYYY-MM-DD` string.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ProrationError::InvalidDate("no date given".into()));
        }
        NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ProrationError::InvalidDate(format!("`{trimmed}` is not a YYYY-MM-DD date")))
    }

    pub fn today(clock: &dyn Clock) -> Self {
        Self(clock.today())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// 1-based day of month.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn days_in_month(&self) -> u32 {
        month_length(self.year(), self.month())
    }

    pub fn is_month_end(&self) -> bool {
        self.day() == self.days_in_month()
    }
}

impl From<NaiveDate> for SettlementDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for SettlementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule_handles_centuries() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn month_lengths_agree_with_chrono() {
        for year in 1890..=2110 {
            for month in 1..=12u32 {
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
                };
                let expected = (next - first).num_days() as u32;
                assert_eq!(days_in_month(year, month), Some(expected), "{year}-{month}");
            }
        }
    }

    #[test]
    fn month_end_matches_the_last_calendar_day() {
        for (year, month) in [(2024, 2), (2025, 2), (2025, 4), (2025, 12), (2100, 2)] {
            let last = SettlementDate::new(year, month, 1)
                .unwrap()
                .date()
                .checked_add_months(chrono::Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap();
            let date = SettlementDate::from(last);
            assert!(date.is_month_end(), "{date}");
            assert_eq!(date.days_in_month(), last.day());
            assert!(!SettlementDate::new(year, month, 1).unwrap().is_month_end());
        }
    }

    #[test]
    fn invalid_month_has_no_length() {
        assert_eq!(days_in_month(2025, 0), None);
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn parses_iso_dates_and_rejects_garbage() {
        let date = SettlementDate::parse(" 2025-01-11 ").expect("valid date");
        assert_eq!((date.year(), date.month(), date.day()), (2025, 1, 11));
        assert_eq!(date.to_string(), "2025-01-11");

        assert!(SettlementDate::parse("2025-02-30").is_err());
        assert!(SettlementDate::parse("tomorrow").is_err());
        assert!(SettlementDate::parse("").is_err());
        assert!(SettlementDate::new(2023, 2, 29).is_err());
    }

    #[test]
    fn today_comes_from_the_clock() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let date = SettlementDate::today(&clock);
        assert_eq!(date.to_string(), "2024-02-29");
        assert!(date.is_month_end());
        assert_eq!(date.days_in_month(), 29);
    }
}
