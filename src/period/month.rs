//! Base month and arrears month labels

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::input::InputError;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar year-month, the month an estimate is anchored on
///
/// Held as a count of months since January of year 0, so stepping back
/// any number of arrears periods is plain integer arithmetic and cannot
/// leave the representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseMonth {
    index: i64,
}

impl BaseMonth {
    /// Build from a four-digit calendar year and month (1-12)
    pub fn from_ym(year: i32, month: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self {
            index: year as i64 * 12 + (month as i64 - 1),
        })
    }

    /// Parse a `YYYY-MM` string as produced by a month picker
    pub fn parse(s: &str) -> Result<Self, InputError> {
        let invalid = || InputError::InvalidBaseMonth(s.to_string());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(month, 2) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::from_ym(year, month).ok_or_else(invalid)
    }

    /// Calendar year; negative only for periods stepped back before year 0
    pub fn year(&self) -> i64 {
        self.index.div_euclid(12)
    }

    pub fn month(&self) -> u32 {
        self.index.rem_euclid(12) as u32 + 1
    }

    /// Months to step back for arrears index `m`
    ///
    /// m=0 and m=1 are both the current month; m=2 is one month back.
    pub fn months_back(m: u32) -> u32 {
        if m <= 1 {
            0
        } else {
            m - 1
        }
    }

    /// Calendar month that arrears index `m` refers to
    pub fn period(&self, m: u32) -> BaseMonth {
        BaseMonth {
            index: self.index - Self::months_back(m) as i64,
        }
    }

    /// Abbreviated month and 2-digit year, e.g. "Jan-26"
    pub fn short_label(&self) -> String {
        format!(
            "{}-{:02}",
            MONTH_ABBREV[self.month() as usize - 1],
            self.year().rem_euclid(100)
        )
    }

    /// Display label for arrears index `m`
    pub fn label(&self, m: u32) -> String {
        self.period(m).short_label()
    }

    /// Last day of the month containing `today`
    pub fn validity_date(today: NaiveDate) -> NaiveDate {
        let first = today.with_day(1).unwrap_or(today);
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl Default for BaseMonth {
    fn default() -> Self {
        Self { index: 2026 * 12 }
    }
}

impl fmt::Display for BaseMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for BaseMonth {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for BaseMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BaseMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
