// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date handling.
//!
//! Every date in the schedule is a plain calendar day. Strings are parsed
//! straight into `time::Date`, never through an instant or a UTC offset, so a
//! stored `2024-01-15` can never drift to the 14th or the 16th. All parsing
//! and formatting goes through [`parse_local_date`] and [`format_date`].

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Weekday};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Span in days between `Date::MIN` and `Date::MAX`, rounded up.
const MAX_DAY_OFFSET: u64 = 7_400_000;

/// Parses a `YYYY-MM-DD` string as a calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_local_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|err| DomainError::DateParseError {
        date_string: value.to_string(),
        error: err.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Adds a signed number of days to a date.
///
/// # Errors
///
/// Returns an error if the result falls outside the supported date range.
pub fn add_days(date: Date, days: i64) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("adding {days} days to {}", format_date(date)),
    };
    // Larger offsets cannot land on a representable date and would overflow `Duration`.
    if days.unsigned_abs() > MAX_DAY_OFFSET {
        return Err(overflow());
    }
    date.checked_add(Duration::days(days)).ok_or_else(overflow)
}

/// Returns the day after `date`.
///
/// # Errors
///
/// Returns an error on date overflow.
pub fn next_day(date: Date) -> Result<Date, DomainError> {
    add_days(date, 1)
}

/// Returns the day before `date`.
///
/// # Errors
///
/// Returns an error on date overflow.
pub fn previous_day(date: Date) -> Result<Date, DomainError> {
    add_days(date, -1)
}

/// Returns the most recent `week_start` day on or before `date`.
///
/// # Errors
///
/// Returns an error on date overflow.
pub fn week_start_on_or_before(date: Date, week_start: Weekday) -> Result<Date, DomainError> {
    let back: u8 =
        (date.weekday().number_days_from_monday() + 7 - week_start.number_days_from_monday()) % 7;
    add_days(date, -i64::from(back))
}

/// Parses an English weekday name (full or three-letter, any case).
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` for anything else.
pub fn parse_weekday(value: &str) -> Result<Weekday, DomainError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Monday),
        "tue" | "tuesday" => Ok(Weekday::Tuesday),
        "wed" | "wednesday" => Ok(Weekday::Wednesday),
        "thu" | "thursday" => Ok(Weekday::Thursday),
        "fri" | "friday" => Ok(Weekday::Friday),
        "sat" | "saturday" => Ok(Weekday::Saturday),
        "sun" | "sunday" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidWeekday(value.to_string())),
    }
}

/// Serde adapter storing dates as `YYYY-MM-DD` strings.
pub mod serde_date {
    use super::{format_date, parse_local_date};
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date through [`format_date`].
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    /// Deserializes a date through [`parse_local_date`].
    ///
    /// # Errors
    ///
    /// Returns a deserializer error if the string is not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        parse_local_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter storing weekdays by their English name.
pub mod serde_weekday {
    use super::parse_weekday;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Weekday;

    /// Serializes a weekday as its full name, e.g. `Monday`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&weekday.to_string())
    }

    /// Deserializes a weekday through [`parse_weekday`].
    ///
    /// # Errors
    ///
    /// Returns a deserializer error for an unknown name.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        parse_weekday(&raw).map_err(serde::de::Error::custom)
    }
}
