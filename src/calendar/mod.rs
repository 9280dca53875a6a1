//! Calendar helpers: canonical month names, calendar quarters, and the clock
//! abstraction that keeps "today" injectable.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// Number of months in a quarter window.
pub const WINDOW_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Looks up a month by its zero-based calendar index.
    pub fn from_index0(index: u32) -> Option<Month> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn of(date: NaiveDate) -> Month {
        // month0() is always within 0..12.
        Self::ALL[date.month0() as usize]
    }

    pub fn index0(self) -> u32 {
        self as u32
    }

    /// Full English name, the form spend records are keyed by.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for Month {
    type Err = TrackerError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|month| {
                month.name().eq_ignore_ascii_case(needle)
                    || month.short_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| TrackerError::InvalidMonth(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Calendar quarter for a zero-based month index: 0–2 → Q1, 3–5 → Q2,
    /// 6–8 → Q3, 9–11 → Q4.
    pub fn for_month(month: Month) -> Quarter {
        match month.index0() {
            0..=2 => Quarter::Q1,
            3..=5 => Quarter::Q2,
            6..=8 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn containing(date: NaiveDate) -> Quarter {
        Self::for_month(Month::of(date))
    }

    pub fn months(self) -> [Month; WINDOW_LEN] {
        let first = match self {
            Quarter::Q1 => 0,
            Quarter::Q2 => 3,
            Quarter::Q3 => 6,
            Quarter::Q4 => 9,
        };
        [
            Month::ALL[first],
            Month::ALL[first + 1],
            Month::ALL[first + 2],
        ]
    }

    /// The immediately preceding quarter. Q1 wraps to Q4.
    pub fn previous(self) -> Quarter {
        match self {
            Quarter::Q1 => Quarter::Q4,
            Quarter::Q2 => Quarter::Q1,
            Quarter::Q3 => Quarter::Q2,
            Quarter::Q4 => Quarter::Q3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quarter {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            _ => Err(TrackerError::InvalidQuarter(raw.to_string())),
        }
    }
}

/// The ordered triple of months a carousel pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterWindow {
    quarter: Quarter,
    months: [Month; WINDOW_LEN],
}

impl QuarterWindow {
    pub fn for_quarter(quarter: Quarter) -> Self {
        Self {
            quarter,
            months: quarter.months(),
        }
    }

    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    pub fn months(&self) -> &[Month; WINDOW_LEN] {
        &self.months
    }

    pub fn month(&self, index: usize) -> Option<Month> {
        self.months.get(index).copied()
    }

    pub fn position(&self, month: Month) -> Option<usize> {
        self.months.iter().position(|candidate| *candidate == month)
    }

    pub fn contains(&self, month: Month) -> bool {
        self.position(month).is_some()
    }

    /// Abbreviated span such as `Apr - Jun`.
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.months[0].short_name(),
            self.months[WINDOW_LEN - 1].short_name()
        )
    }
}

/// Name of the calendar month containing `today`.
pub fn current_month_name(today: NaiveDate) -> Month {
    Month::of(today)
}

/// The three months of the calendar quarter containing `today`.
pub fn current_quarter_months(today: NaiveDate) -> QuarterWindow {
    QuarterWindow::for_quarter(Quarter::containing(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_month_uses_zero_based_index() {
        assert_eq!(current_month_name(date(2025, 1, 31)), Month::January);
        assert_eq!(current_month_name(date(2025, 5, 1)), Month::May);
        assert_eq!(current_month_name(date(2025, 12, 15)), Month::December);
    }

    #[test]
    fn quarter_boundaries_follow_calendar() {
        assert_eq!(Quarter::containing(date(2025, 3, 31)), Quarter::Q1);
        assert_eq!(Quarter::containing(date(2025, 4, 1)), Quarter::Q2);
        assert_eq!(Quarter::containing(date(2025, 9, 30)), Quarter::Q3);
        assert_eq!(Quarter::containing(date(2025, 10, 1)), Quarter::Q4);
    }

    #[test]
    fn current_quarter_months_lists_three_consecutive_months() {
        let window = current_quarter_months(date(2025, 5, 12));
        assert_eq!(
            window.months(),
            &[Month::April, Month::May, Month::June]
        );
        assert_eq!(window.range_label(), "Apr - Jun");
    }

    #[test]
    fn previous_quarter_wraps_q1_to_q4() {
        assert_eq!(Quarter::Q1.previous(), Quarter::Q4);
        assert_eq!(Quarter::Q3.previous(), Quarter::Q2);
    }

    #[test]
    fn parses_month_and_quarter_names() {
        assert_eq!("april".parse::<Month>().unwrap(), Month::April);
        assert_eq!("Sep".parse::<Month>().unwrap(), Month::September);
        assert!("Smarch".parse::<Month>().is_err());
        assert_eq!(" q4 ".parse::<Quarter>().unwrap(), Quarter::Q4);
        assert!("Q0".parse::<Quarter>().is_err());
    }

    #[test]
    fn window_position_reports_missing_months() {
        let window = QuarterWindow::for_quarter(Quarter::Q3);
        assert_eq!(window.position(Month::August), Some(1));
        assert_eq!(window.position(Month::January), None);
        assert_eq!(window.month(3), None);
    }
}
