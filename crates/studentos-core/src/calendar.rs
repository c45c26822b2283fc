//! Calendar-day helpers.
//!
//! Instants are stored in UTC; anything that talks about "today",
//! "tomorrow" or a weekday is evaluated in the caller's time zone.
//! Weekday indices follow the 0 = Sunday .. 6 = Saturday convention.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

/// Milliseconds in a 24h period.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Calendar date of `at` as seen in `tz`.
pub fn day_of<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

/// Weekday index of `date`, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always in 0..=6
    date.weekday().num_days_from_sunday() as u8
}

/// Signed number of calendar days from `from` to `to`.
pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Whole 24h periods elapsed from `from` to `to`, floored.
pub fn floor_days_between(from: &DateTime<Utc>, to: &DateTime<Utc>) -> i64 {
    (*to - *from).num_milliseconds().div_euclid(DAY_MS)
}

/// Next date on or after `today` whose weekday is in `weekdays`.
///
/// Searches today plus the following six days, so every weekday is reachable.
pub fn next_occurrence(weekdays: &BTreeSet<u8>, today: NaiveDate) -> Option<NaiveDate> {
    if weekdays.is_empty() {
        return None;
    }
    (0..7u64)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .find(|candidate| weekdays.contains(&weekday_index(*candidate)))
}
