//! Calendar arithmetic with day-of-month rollover.
//!
//! Year and month steps keep the day-of-month; when the target month is
//! shorter, the surplus days spill into the following month
//! (2024-03-31 minus one month is 2024-03-02, not 2024-02-29).
//! Day steps are plain day arithmetic.

use chrono::{Datelike, Days, NaiveDate};

/// Build a date from a year, a zero-based month that may fall outside
/// `0..12`, and a day that may fall outside the month.
///
/// Month overflow adjusts the year; day overflow (including day 0 and
/// negative days) is counted from the first of the normalized month.
pub fn from_ymd_rolling(year: i32, month0: i64, day: i64) -> Option<NaiveDate> {
    let total_months = i64::from(year).checked_mul(12)?.checked_add(month0)?;
    let year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let month = u32::try_from(total_months.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    add_days(first, day.checked_sub(1)?)
}

/// Shift by whole years, keeping month and day-of-month
pub fn add_years(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    let year = i32::try_from(i64::from(date.year()).checked_add(years)?).ok()?;
    from_ymd_rolling(year, i64::from(date.month0()), i64::from(date.day()))
}

/// Shift by whole months, keeping day-of-month
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    from_ymd_rolling(
        date.year(),
        i64::from(date.month0()).checked_add(months)?,
        i64::from(date.day()),
    )
}

/// Shift by whole days
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}
