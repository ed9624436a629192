//! Reporting periods and calendar-month arithmetic.
//!
//! A [`ReportPeriod`] is a year plus a set of zero-based month indices
//! (0 = January … 11 = December). An empty month set means the whole year,
//! everywhere a period is consumed: the sales window, fixed-cost proration,
//! and the salesperson summary.
//!
//! Month comparisons go through [`MonthKey`], an absolute (year, month) pair,
//! so that a cost starting in November and running six months is correctly
//! active in the following January.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;

/// Month labels in Portuguese, indexed by zero-based month.
pub const MONTH_LABELS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

/// An absolute calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month0: u32,
}

impl MonthKey {
    /// Builds a key from a year and a zero-based month.
    pub fn new(year: i32, month0: u32) -> Result<Self> {
        if month0 > 11 {
            return Err(Error::InvalidPeriod {
                message: format!("month index {month0} is out of range (0-11)"),
            });
        }
        Ok(Self { year, month0 })
    }

    /// The month a date falls in.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month.
    #[must_use]
    pub const fn month0(self) -> u32 {
        self.month0
    }

    /// Months since year 0, used for range arithmetic.
    #[must_use]
    pub fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month0)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        // month0 is in 0..12 and year stays within i32 for any date chrono accepts
        #[allow(clippy::cast_possible_truncation)]
        let year = ordinal.div_euclid(12) as i32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let month0 = ordinal.rem_euclid(12) as u32;
        Self { year, month0 }
    }

    /// The key `months` months after this one (negative goes back).
    #[must_use]
    pub fn offset(self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> Option<NaiveDate> {
        self.offset(1).first_day().and_then(|d| d.pred_opt())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month0 + 1, self.year)
    }
}

/// Whether `month` lies in the `duration` consecutive months starting at `start`.
///
/// A non-positive duration covers nothing.
#[must_use]
pub fn month_in_range(start: MonthKey, duration: i32, month: MonthKey) -> bool {
    if duration < 1 {
        return false;
    }
    let offset = month.ordinal() - start.ordinal();
    (0..i64::from(duration)).contains(&offset)
}

/// A year and a set of selected months.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportPeriod {
    year: i32,
    months: BTreeSet<u32>,
}

impl ReportPeriod {
    /// Builds a period from a year and zero-based month indices.
    ///
    /// Duplicates are ignored. An empty iterator selects the whole year.
    pub fn new<I>(year: i32, months: I) -> Result<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidPeriod {
                message: format!("year {year} is out of range ({MIN_YEAR}-{MAX_YEAR})"),
            });
        }

        let months: BTreeSet<u32> = months.into_iter().collect();
        if let Some(bad) = months.iter().find(|&&m| m > 11) {
            return Err(Error::InvalidPeriod {
                message: format!("month index {bad} is out of range (0-11)"),
            });
        }

        Ok(Self { year, months })
    }

    /// All twelve months of `year`.
    pub fn whole_year(year: i32) -> Result<Self> {
        Self::new(year, [])
    }

    /// Year the period refers to.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// True when no month was explicitly selected.
    #[must_use]
    pub fn is_whole_year(&self) -> bool {
        self.months.is_empty()
    }

    /// Zero-based months the period covers, in calendar order.
    #[must_use]
    pub fn effective_months(&self) -> Vec<u32> {
        if self.months.is_empty() {
            (0..12).collect()
        } else {
            self.months.iter().copied().collect()
        }
    }

    /// Absolute months the period covers, in calendar order.
    #[must_use]
    pub fn month_keys(&self) -> Vec<MonthKey> {
        self.effective_months()
            .into_iter()
            .map(|month0| MonthKey {
                year: self.year,
                month0,
            })
            .collect()
    }

    /// Whether the period selects `month`.
    #[must_use]
    pub fn contains_month(&self, month: MonthKey) -> bool {
        month.year == self.year && (self.months.is_empty() || self.months.contains(&month.month0))
    }

    /// Whether `date` falls in one of the selected months.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_month(MonthKey::from_date(date))
    }

    /// First and last calendar day touched by the period.
    ///
    /// Used to narrow database queries; callers still filter with
    /// [`ReportPeriod::contains`] because the selected months need not be
    /// contiguous.
    pub fn date_bounds(&self) -> Result<(NaiveDate, NaiveDate)> {
        let keys = self.month_keys();
        let invalid = || Error::InvalidPeriod {
            message: format!("no valid calendar days in {self}"),
        };

        let first = keys
            .first()
            .and_then(|k| k.first_day())
            .ok_or_else(invalid)?;
        let last = keys.last().and_then(|k| k.last_day()).ok_or_else(invalid)?;
        Ok((first, last))
    }

    /// How many of the selected months fall in the `duration` months starting at `start`.
    #[must_use]
    pub fn months_covered(&self, start: MonthKey, duration: i32) -> u32 {
        let covered = self
            .month_keys()
            .into_iter()
            .filter(|&m| month_in_range(start, duration, m))
            .count();
        // At most twelve
        u32::try_from(covered).unwrap_or(12)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months.is_empty() {
            return write!(f, "{} (ano inteiro)", self.year);
        }
        let labels: Vec<&str> = self
            .months
            .iter()
            .filter_map(|&m| MONTH_LABELS.get(m as usize).copied())
            .collect();
        write!(f, "{} de {}", labels.join(", "), self.year)
    }
}

/// Parses a comma-separated list of one-based month numbers (`"1, 2,12"`)
/// into zero-based indices. Blank input yields an empty list.
pub fn parse_month_list(input: &str) -> Result<Vec<u32>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let month: u32 = part.parse().map_err(|_| Error::InvalidPeriod {
                message: format!("'{part}' is not a month number"),
            })?;
            if (1..=12).contains(&month) {
                Ok(month - 1)
            } else {
                Err(Error::InvalidPeriod {
                    message: format!("month {month} is out of range (1-12)"),
                })
            }
        })
        .collect()
}
