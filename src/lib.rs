mod consts;
mod epoch;
mod prelude;
mod range;
mod types;

pub use consts::*;
pub use range::{DateField, RangeError, ValueRange, range_of};
pub use types::{Day, Era, Month, Year, days_in_month, days_in_year, is_leap_year};

use crate::consts::EPOCH_CE_DAYS;
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::str::FromStr;

/// A date in the Persian calendar system.
///
/// The year has thirteen months: twelve of 30 days followed by a short
/// intercalary month of 5 days, or 6 in a leap year. Values are
/// immutable; the adjusters return new dates. Epoch day 0 is
/// `0001-01-01`, which corresponds to ISO 0284-08-29.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct PersianDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "{_0}")]
    OutOfRange(RangeError),
}

impl std::error::Error for ParseError {}

impl From<RangeError> for ParseError {
    fn from(err: RangeError) -> Self {
        Self::OutOfRange(err)
    }
}

impl PersianDate {
    /// Creates a date from a proleptic year, month, and day-of-month.
    ///
    /// Validation is fail-fast: the month is checked before the day, and
    /// day 6 of month 13 is rejected outside leap years. Invalid input
    /// is never normalized into a neighboring date.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidMonth` or `RangeError::InvalidDayOfMonth`.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, RangeError> {
        let month_checked = Month::new(month)?;
        let day_checked = Day::new(day, year, month)?;
        Ok(Self {
            year: Year::new(year),
            month: month_checked,
            day: day_checked,
        })
    }

    /// Creates a date from an era, a year within that era, a month, and
    /// a day-of-month.
    ///
    /// # Errors
    /// Same as [`PersianDate::new`].
    pub fn from_era(era: Era, year_of_era: i32, month: u8, day: u8) -> Result<Self, RangeError> {
        Self::new(era.proleptic_year(year_of_era), month, day)
    }

    /// Creates a date from a proleptic year and a 1-based day-of-year.
    ///
    /// Day 365 of any year is `13-05`; day 366 exists only in leap years
    /// and is `13-06`.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidDayOfYear` if the day is 0 or exceeds
    /// the year's length.
    pub fn from_year_day(year: i32, day_of_year: u16) -> Result<Self, RangeError> {
        if day_of_year == 0 || day_of_year > days_in_year(year) {
            return Err(RangeError::InvalidDayOfYear { year, day_of_year });
        }
        let (month, day) = epoch::month_day_from_year_day(day_of_year);
        Ok(Self::from_valid_parts(year, month, day))
    }

    /// Creates the date a given number of days after epoch day 0
    /// (`0001-01-01`).
    ///
    /// This conversion is total: every epoch day maps to exactly one
    /// date, so unlike the field constructors it cannot fail.
    pub fn from_epoch_day(epoch_day: i64) -> Self {
        let (year, month, day) = epoch::ymd_from_epoch_day(epoch_day);
        Self::from_valid_parts(year, month, day)
    }

    /// The number of days since epoch day 0 (`0001-01-01`)
    pub const fn to_epoch_day(self) -> i64 {
        epoch::epoch_day_from_ymd(self.year.get(), self.month.get(), self.day.get())
    }

    /// Returns the proleptic year
    #[inline]
    pub const fn year(self) -> i32 {
        self.year.get()
    }

    /// Returns the month-of-year (1..=13)
    #[inline]
    pub const fn month(self) -> u8 {
        self.month.get()
    }

    /// Returns the day-of-month
    #[inline]
    pub const fn day(self) -> u8 {
        self.day.get()
    }

    /// Returns the era this date falls in
    #[inline]
    pub const fn era(self) -> Era {
        self.year.era()
    }

    /// Returns the year within the era, counting from 1
    #[inline]
    pub const fn year_of_era(self) -> i32 {
        self.year.year_of_era()
    }

    /// Returns the 1-based day-of-year
    pub const fn day_of_year(self) -> u16 {
        (self.month.get() as u16 - 1) * DAYS_IN_STANDARD_MONTH as u16 + self.day.get() as u16
    }

    /// Whether this date's year is a leap year
    #[inline]
    pub const fn is_leap_year(self) -> bool {
        self.year.is_leap()
    }

    /// Number of days in this date's month
    pub const fn days_in_month(self) -> u8 {
        days_in_month(self.year.get(), self.month.get())
    }

    /// Number of days in this date's year
    #[inline]
    pub const fn days_in_year(self) -> u16 {
        self.year.length_in_days()
    }

    /// Returns the Year type
    #[inline]
    pub const fn year_typed(self) -> Year {
        self.year
    }

    /// Returns the Month type
    #[inline]
    pub const fn month_typed(self) -> Month {
        self.month
    }

    /// Returns the Day type
    #[inline]
    pub const fn day_typed(self) -> Day {
        self.day
    }

    /// Returns a copy of this date with the day-of-month replaced.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidDayOfMonth` if the day is invalid for
    /// this year and month.
    pub fn with_day(self, day: u8) -> Result<Self, RangeError> {
        let day_checked = Day::new(day, self.year.get(), self.month.get())?;
        Ok(Self {
            day: day_checked,
            ..self
        })
    }

    /// Returns the last day of this date's month (the "last day of
    /// month" adjustment): day 30 for months 1..=12, day 5 or 6 for the
    /// intercalary month.
    pub fn last_of_month(self) -> Self {
        Self::from_valid_parts(self.year.get(), self.month.get(), self.days_in_month())
    }

    /// Returns the date the given number of days later (earlier when
    /// negative), crossing month and year boundaries exactly.
    pub fn plus_days(self, days: i64) -> Self {
        Self::from_epoch_day(self.to_epoch_day() + days)
    }

    /// Assembles a date from parts the converters already validated.
    fn from_valid_parts(year: i32, month: u8, day: u8) -> Self {
        Self {
            year: Year::new(year),
            month: Month::from_valid(month),
            day: Day::from_valid(day),
        }
    }
}

impl FromStr for PersianDate {
    type Err = ParseError;

    /// Parses the canonical `YYYY-MM-DD` form, with an optional leading
    /// `-` for years before year zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let parts: Vec<&str> = unsigned.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let year_magnitude = Self::parse_i32(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let day = Self::parse_u8(parts[2])?;

        let year = if negative { -year_magnitude } else { year_magnitude };
        Self::new(year, month, day).map_err(ParseError::from)
    }
}

impl PersianDate {
    /// Helper to parse i32 with better error messages
    fn parse_i32(s: &str) -> Result<i32, ParseError> {
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(i32, u8, u8)> for PersianDate {
    type Error = RangeError;

    fn try_from(value: (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<NaiveDate> for PersianDate {
    /// Converts an ISO date through the shared day count. Total: every
    /// ISO date has a Persian counterpart.
    fn from(iso: NaiveDate) -> Self {
        Self::from_epoch_day(i64::from(iso.num_days_from_ce()) - i64::from(EPOCH_CE_DAYS))
    }
}

impl TryFrom<PersianDate> for NaiveDate {
    type Error = RangeError;

    /// Converts to an ISO date through the shared day count. The Persian
    /// year span advertised here is wider than chrono's, so the reverse
    /// direction can fail.
    fn try_from(date: PersianDate) -> Result<Self, Self::Error> {
        let epoch_day = date.to_epoch_day();
        i32::try_from(epoch_day + i64::from(EPOCH_CE_DAYS))
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or(RangeError::IsoOutOfRange { epoch_day })
    }
}

impl serde::Serialize for PersianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PersianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
