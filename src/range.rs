use crate::consts::{
    DAYS_IN_STANDARD_MONTH, DAYS_PER_LEAP_YEAR, DAYS_PER_YEAR, INTERCALARY_DAYS, MAX_MONTH,
    MAX_YEAR, MIN_YEAR,
};
use crate::epoch;
use crate::prelude::*;

/// A date field whose legal values this calendar advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DateField {
    #[display(fmt = "era")]
    Era,
    #[display(fmt = "year-of-era")]
    YearOfEra,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month-of-year")]
    MonthOfYear,
    #[display(fmt = "day-of-month")]
    DayOfMonth,
    #[display(fmt = "day-of-year")]
    DayOfYear,
    #[display(fmt = "aligned-week-of-month")]
    AlignedWeekOfMonth,
    #[display(fmt = "epoch-day")]
    EpochDay,
}

/// The span of valid values for a date field.
///
/// For variable-length fields the smallest maximum differs from the
/// maximum: day-of-month tops out at 5 in the intercalary month of a
/// common year but at 30 elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{min}..={max}")]
pub struct ValueRange {
    min: i64,
    smallest_max: i64,
    max: i64,
}

impl ValueRange {
    /// A fixed range whose maximum never varies
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max: max,
            max,
        }
    }

    /// A range whose maximum depends on other fields
    pub const fn with_smallest_max(min: i64, smallest_max: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max,
            max,
        }
    }

    /// Returns the smallest valid value
    #[inline]
    pub const fn min(self) -> i64 {
        self.min
    }

    /// Returns the largest maximum this field ever takes
    #[inline]
    pub const fn max(self) -> i64 {
        self.max
    }

    /// Returns the smallest maximum this field ever takes
    #[inline]
    pub const fn smallest_max(self) -> i64 {
        self.smallest_max
    }

    /// Whether the maximum is the same in every context
    #[inline]
    pub const fn is_fixed(self) -> bool {
        self.smallest_max == self.max
    }

    /// Whether the value falls inside the widest bounds
    #[inline]
    pub const fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The valid span of each date field in this calendar.
///
/// The year span is the advertised bound pair from `consts`; the
/// conversion arithmetic accepts any representable year.
pub const fn range_of(field: DateField) -> ValueRange {
    match field {
        DateField::Era => ValueRange::new(0, 1),
        DateField::YearOfEra => {
            ValueRange::with_smallest_max(1, MAX_YEAR as i64, 1 - MIN_YEAR as i64)
        }
        DateField::Year => ValueRange::new(MIN_YEAR as i64, MAX_YEAR as i64),
        DateField::MonthOfYear => ValueRange::new(1, MAX_MONTH as i64),
        DateField::DayOfMonth => ValueRange::with_smallest_max(
            1,
            INTERCALARY_DAYS as i64,
            DAYS_IN_STANDARD_MONTH as i64,
        ),
        DateField::DayOfYear => {
            ValueRange::with_smallest_max(1, DAYS_PER_YEAR as i64, DAYS_PER_LEAP_YEAR as i64)
        }
        // a 30-day month spans five aligned weeks, the intercalary month one
        DateField::AlignedWeekOfMonth => ValueRange::with_smallest_max(1, 1, 5),
        DateField::EpochDay => ValueRange::new(
            epoch::first_day_of_year(MIN_YEAR as i64),
            epoch::first_day_of_year(MAX_YEAR as i64 + 1) - 1,
        ),
    }
}

/// Error type for field validation.
///
/// Every variant names the offending field and value; errors are raised
/// at construction time and never from an epoch-day conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Month outside 1..=13.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// Day outside the month's span, including day 6 of month 13 in a
    /// common year.
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDayOfMonth { year: i32, month: u8, day: u8 },

    /// Day-of-year outside 1..=365 (or 1..=366 in a leap year).
    #[error("Invalid day-of-year {day_of_year} for year {year}")]
    InvalidDayOfYear { year: i32, day_of_year: u16 },

    /// Era value other than 0 or 1.
    #[error("Invalid era value: {0} (must be 0 or 1)")]
    InvalidEra(u8),

    /// The date has no counterpart in the host ISO calendar.
    #[error("Date is outside the ISO calendar range (epoch day {epoch_day})")]
    IsoOutOfRange { epoch_day: i64 },
}
