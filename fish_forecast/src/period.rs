//! Calendar month keys for the production time axis

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month of a given year.
///
/// Ordering is chronological: by year, then by month. Field order matters
/// for the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod", into = "RawPeriod")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

#[derive(Serialize, Deserialize)]
struct RawPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawPeriod> for PeriodKey {
    type Error = ForecastError;

    fn try_from(raw: RawPeriod) -> Result<Self> {
        PeriodKey::new(raw.month, raw.year)
    }
}

impl From<PeriodKey> for RawPeriod {
    fn from(key: PeriodKey) -> Self {
        RawPeriod {
            month: key.month,
            year: key.year,
        }
    }
}

impl PeriodKey {
    /// Create a period from a month index (1 = January) and a year
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ForecastError::InvalidPeriod(format!(
                "year {} is out of range",
                year
            )));
        }

        Ok(Self { year, month })
    }

    /// Create a period from an English month name or its three-letter
    /// abbreviation, in any case
    pub fn parse(month_name: &str, year: i32) -> Result<Self> {
        let month = Month::from_str(month_name.trim()).map_err(|_| {
            ForecastError::InvalidPeriod(format!("unrecognized month name '{}'", month_name))
        })?;

        Self::new(month.number_from_month(), year)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The period immediately after this one.
    ///
    /// Fails with `InvalidPeriod` past the last month chrono can represent.
    pub fn succ(&self) -> Result<Self> {
        if self.month < 12 {
            return Self::new(self.month + 1, self.year);
        }

        let year = self.year.checked_add(1).ok_or_else(|| {
            ForecastError::InvalidPeriod(format!("no month follows {}", self))
        })?;
        Self::new(1, year)
    }

    /// First calendar day of the period
    pub fn first_day(&self) -> NaiveDate {
        // Both fields were checked against chrono's range on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Full English month name, e.g. `January`
    pub fn month_name(&self) -> &'static str {
        self.as_month().name()
    }

    fn as_month(&self) -> Month {
        Month::try_from(self.month as u8).unwrap_or(Month::January)
    }
}

impl From<NaiveDate> for PeriodKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Renders as `Apr 2024`
impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", &self.month_name()[..3], self.year)
    }
}

/// Parses `"<month name> <year>"`, e.g. `"January 2024"` or `"jan 2024"`
impl FromStr for PeriodKey {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ForecastError::InvalidPeriod(format!(
                "expected '<month> <year>', got '{}'",
                s
            )));
        };

        let year = year
            .parse::<i32>()
            .map_err(|_| ForecastError::InvalidPeriod(format!("invalid year '{}'", year)))?;

        Self::parse(month, year)
    }
}
