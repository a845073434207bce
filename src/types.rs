use crate::RangeError;
use crate::consts::{
    DAYS_IN_STANDARD_MONTH, DAYS_PER_LEAP_YEAR, DAYS_PER_YEAR, INTERCALARY_DAYS,
    INTERCALARY_DAYS_LEAP, INTERCALARY_MONTH, LEAP_YEAR_CYCLE, LEAP_YEAR_REMAINDER, MAX_MONTH,
    MIN_DAY,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A proleptic year of the Persian calendar.
///
/// Year 1 and later belong to the AM era; year 0 and earlier belong to
/// the era before it, counted backwards (year-of-era `1 - year`). Any
/// `i32` is a representable year; the span advertised to hosts lives in
/// the field-range table, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Year(i32);

impl Year {
    /// Creates a new Year. All values are valid; no range check applies.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the proleptic year value as i32
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Whether this year has an extra intercalary day (366 days)
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.0)
    }

    /// The era this year falls in
    #[inline]
    pub const fn era(self) -> Era {
        if self.0 >= 1 { Era::Am } else { Era::BeforeAm }
    }

    /// The year number within its era, counting from 1
    #[inline]
    pub const fn year_of_era(self) -> i32 {
        match self.era() {
            Era::Am => self.0,
            Era::BeforeAm => 1 - self.0,
        }
    }

    /// Number of days in this year (365 or 366)
    #[inline]
    pub const fn length_in_days(self) -> u16 {
        days_in_year(self.0)
    }
}

impl From<i32> for Year {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=13)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `RangeError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, RangeError> {
        let non_zero = NonZeroU8::new(value).ok_or(RangeError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(RangeError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Whether this is the short 13th month
    #[inline]
    pub const fn is_intercalary(self) -> bool {
        self.0.get() == INTERCALARY_MONTH
    }

    /// Wraps a value the epoch-day decomposition already proved valid.
    pub(crate) fn from_valid(value: u8) -> Self {
        debug_assert!(value != 0 && value <= MAX_MONTH);
        Self(NonZeroU8::new(value).unwrap_or(NonZeroU8::MIN))
    }
}

impl TryFrom<u8> for Month {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for the
    /// given year and month. Day 6 of month 13 only exists in leap years.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidDayOfMonth` if the value is 0 or invalid
    /// for the given year and month.
    pub fn new(value: u8, year: i32, month: u8) -> Result<Self, RangeError> {
        let non_zero = NonZeroU8::new(value).ok_or(RangeError::InvalidDayOfMonth {
            year,
            month,
            day: value,
        })?;

        let max_day = days_in_month(year, month);
        if value > max_day {
            return Err(RangeError::InvalidDayOfMonth {
                year,
                month,
                day: value,
            });
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Wraps a value the epoch-day decomposition already proved valid.
    pub(crate) fn from_valid(value: u8) -> Self {
        debug_assert!(value != 0 && value <= DAYS_IN_STANDARD_MONTH);
        Self(NonZeroU8::new(value).unwrap_or(NonZeroU8::MIN))
    }
}

impl TryFrom<u8> for Day {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate without year/month context, so check the widest bounds
        if !(MIN_DAY..=DAYS_IN_STANDARD_MONTH).contains(&value) {
            return Err(RangeError::InvalidDayOfMonth {
                year: 0,
                month: 0,
                day: value,
            });
        }
        let non_zero = NonZeroU8::new(value).ok_or(RangeError::InvalidDayOfMonth {
            year: 0,
            month: 0,
            day: value,
        })?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An era in the Persian calendar system.
///
/// There are exactly two: `Am` (value 1) covers proleptic years >= 1,
/// `BeforeAm` (value 0) covers years <= 0 with year-of-era `1 - year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    /// The era before the current one, numeric value 0
    BeforeAm,
    /// The current era, numeric value 1
    Am,
}

impl Era {
    /// Obtains an Era from its numeric value.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidEra` unless the value is 0 or 1.
    pub const fn of(value: u8) -> Result<Self, RangeError> {
        match value {
            0 => Ok(Self::BeforeAm),
            1 => Ok(Self::Am),
            _ => Err(RangeError::InvalidEra(value)),
        }
    }

    /// The era numeric value: 0 for `BeforeAm`, 1 for `Am`
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Converts a year-of-era (counting from 1 in this era's direction)
    /// into a proleptic year.
    #[inline]
    pub const fn proleptic_year(self, year_of_era: i32) -> i32 {
        match self {
            Self::Am => year_of_era,
            Self::BeforeAm => 1 - year_of_era,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeAm => f.write_str("BEFORE_AM"),
            Self::Am => f.write_str("AM"),
        }
    }
}

// Helper functions

/// A proleptic year is leap iff its floor remainder after division by
/// four equals three, so years 3, 7, 11, ... and -1, -5, ... are leap.
/// The input is not range-checked.
pub const fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(LEAP_YEAR_CYCLE) == LEAP_YEAR_REMAINDER
}

/// Number of days in the given month: 30 for months 1..=12, 5 or 6 for
/// the intercalary month depending on the year.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == INTERCALARY_MONTH {
        if is_leap_year(year) {
            INTERCALARY_DAYS_LEAP
        } else {
            INTERCALARY_DAYS
        }
    } else {
        DAYS_IN_STANDARD_MONTH
    }
}

/// Number of days in the given year (365 or 366)
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        DAYS_PER_LEAP_YEAR
    } else {
        DAYS_PER_YEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 3,
                is_leap: true,
                description: "remainder 3",
            },
            TestCase {
                year: 7,
                is_leap: true,
                description: "remainder 3",
            },
            TestCase {
                year: 1727,
                is_leap: true,
                description: "remainder 3",
            },
            TestCase {
                year: 4,
                is_leap: false,
                description: "remainder 0",
            },
            TestCase {
                year: 1728,
                is_leap: false,
                description: "remainder 0",
            },
            TestCase {
                year: 0,
                is_leap: false,
                description: "year zero, remainder 0",
            },
            TestCase {
                year: -1,
                is_leap: true,
                description: "floor remainder 3 for negative year",
            },
            TestCase {
                year: -5,
                is_leap: true,
                description: "floor remainder 3 for negative year",
            },
            TestCase {
                year: -4,
                is_leap: false,
                description: "floor remainder 0 for negative year",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({}): expected {}",
                case.year,
                case.description,
                if case.is_leap {
                    "leap year"
                } else {
                    "not leap year"
                }
            );
        }
    }

    #[test]
    fn test_leap_year_periodicity() {
        for year in -200..200 {
            assert_eq!(
                is_leap_year(year),
                is_leap_year(year + 4),
                "periodicity broken at year {year}"
            );
            let leaps_in_window = (year..year + 4).filter(|&y| is_leap_year(y)).count();
            assert_eq!(
                leaps_in_window, 1,
                "expected exactly one leap year in {year}..{}",
                year + 4
            );
        }
    }

    #[test]
    fn test_days_in_month_standard_months() {
        for month in 1..=12 {
            assert_eq!(
                days_in_month(1_728, month),
                30,
                "Month {month} should have 30 days"
            );
        }
    }

    #[test]
    fn test_days_in_month_intercalary() {
        assert_eq!(days_in_month(1_727, 13), 6, "leap year");
        assert_eq!(days_in_month(1_728, 13), 5, "common year");
        assert_eq!(days_in_month(-1, 13), 6, "negative leap year");
        assert_eq!(days_in_month(0, 13), 5, "year zero is common");
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(1_727), 366);
        assert_eq!(days_in_year(1_728), 365);
        assert_eq!(days_in_year(-1), 366);
        assert_eq!(days_in_year(0), 365);
    }

    #[test]
    fn test_year_accessors() {
        let year = Year::new(1_728);
        assert_eq!(year.get(), 1_728);
        assert_eq!(year.era(), Era::Am);
        assert_eq!(year.year_of_era(), 1_728);
        assert!(!year.is_leap());
        assert_eq!(year.length_in_days(), 365);
    }

    #[test]
    fn test_year_before_era() {
        assert_eq!(Year::new(0).era(), Era::BeforeAm);
        assert_eq!(Year::new(0).year_of_era(), 1);
        assert_eq!(Year::new(-3).era(), Era::BeforeAm);
        assert_eq!(Year::new(-3).year_of_era(), 4);
        assert_eq!(Year::new(1).era(), Era::Am);
        assert_eq!(Year::new(1).year_of_era(), 1);
    }

    #[test]
    fn test_year_display_and_conversions() {
        let year: Year = 1_728.into();
        assert_eq!(year.to_string(), "1728");
        let value: i32 = year.into();
        assert_eq!(value, 1_728);
        assert_eq!(Year::new(-42).to_string(), "-42");
    }

    #[test]
    fn test_year_ordering() {
        assert!(Year::new(-1) < Year::new(0));
        assert!(Year::new(0) < Year::new(1));
        assert!(Year::new(1_727) < Year::new(1_728));
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(1_728);
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "1728");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);

        let negative: Year = serde_json::from_str("-5").unwrap();
        assert_eq!(negative, Year::new(-5));
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=13 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(RangeError::InvalidMonth(0))));
        assert!(matches!(Month::new(14), Err(RangeError::InvalidMonth(14))));
        assert!(matches!(
            Month::new(255),
            Err(RangeError::InvalidMonth(255))
        ));
    }

    #[test]
    fn test_month_intercalary_flag() {
        assert!(Month::new(13).unwrap().is_intercalary());
        assert!(!Month::new(12).unwrap().is_intercalary());
    }

    #[test]
    fn test_month_conversions_and_display() {
        let month: Month = 8.try_into().unwrap();
        assert_eq!(month.get(), 8);
        let value: u8 = month.into();
        assert_eq!(value, 8);
        assert_eq!(month.to_string(), "8");

        let result: Result<Month, _> = 14.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(13).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "13");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, parsed);

        let result: Result<Month, _> = serde_json::from_str("14");
        assert!(result.is_err());
    }

    #[test]
    fn test_day_new_standard_months() {
        assert!(Day::new(1, 1_728, 1).is_ok());
        assert!(Day::new(30, 1_728, 1).is_ok());
        assert!(Day::new(31, 1_728, 1).is_err());
        assert!(Day::new(30, 1_728, 12).is_ok());
        assert!(Day::new(31, 1_728, 12).is_err());
        assert!(Day::new(0, 1_728, 1).is_err());
    }

    #[test]
    fn test_day_new_intercalary_month() {
        // 1727 is leap, 1728 is not
        assert!(Day::new(5, 1_728, 13).is_ok());
        assert!(Day::new(6, 1_728, 13).is_err());
        assert!(Day::new(6, 1_727, 13).is_ok());
        assert!(Day::new(7, 1_727, 13).is_err());
    }

    #[test]
    fn test_day_new_error_fields() {
        let result = Day::new(31, 1_728, 4);
        assert!(matches!(
            result,
            Err(RangeError::InvalidDayOfMonth {
                year: 1_728,
                month: 4,
                day: 31
            })
        ));
    }

    #[test]
    fn test_day_try_from_u8() {
        // Context-free validation only checks the widest bounds
        let day: Day = 30.try_into().unwrap();
        assert_eq!(day.get(), 30);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());

        let result: Result<Day, _> = 31.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_day_display_and_serde() {
        let day = Day::new(15, 1_728, 8).unwrap();
        assert_eq!(day.to_string(), "15");

        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "15");
        let parsed: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(day, parsed);
    }

    #[test]
    fn test_era_of() {
        assert_eq!(Era::of(0).unwrap(), Era::BeforeAm);
        assert_eq!(Era::of(1).unwrap(), Era::Am);
        assert!(matches!(Era::of(2), Err(RangeError::InvalidEra(2))));
    }

    #[test]
    fn test_era_value_round_trip() {
        for era in [Era::BeforeAm, Era::Am] {
            assert_eq!(Era::of(era.value()).unwrap(), era);
        }
    }

    #[test]
    fn test_era_proleptic_year() {
        assert_eq!(Era::Am.proleptic_year(1_728), 1_728);
        assert_eq!(Era::Am.proleptic_year(1), 1);
        assert_eq!(Era::BeforeAm.proleptic_year(1), 0);
        assert_eq!(Era::BeforeAm.proleptic_year(4), -3);
    }

    #[test]
    fn test_era_display() {
        assert_eq!(Era::Am.to_string(), "AM");
        assert_eq!(Era::BeforeAm.to_string(), "BEFORE_AM");
    }
}
