//! Calendar primitives.
//!
//! All arithmetic is on [`NaiveDate`], a plain calendar date with no time or
//! timezone component, so there is no daylight-saving or offset skew.
//! Results that would leave chrono's representable range saturate at
//! [`NaiveDate::MIN`] / [`NaiveDate::MAX`] instead of panicking.

use chrono::{Datelike, Days, NaiveDate};

/// Returns `date + n` days (negative `n` moves backwards).
#[must_use]
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Adds calendar years and months, clamping to the last day of the target
/// month when it is shorter than the original day-of-month.
///
/// Negative offsets are allowed: `add_years_months(d, -1, 0)` is "twelve
/// months before `d`". 29/02/2020 minus one year is 28/02/2019.
#[must_use]
pub fn add_years_months(date: NaiveDate, years: i64, months: i64) -> NaiveDate {
    let total = i64::from(date.year()) * 12
        + i64::from(date.month0())
        + years.saturating_mul(12)
        + months;
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12) + 1) as u32;

    let Ok(year) = i32::try_from(year) else {
        return if total >= 0 { NaiveDate::MAX } else { NaiveDate::MIN };
    };
    let Some(last) = last_day_of_month(year, month) else {
        return if year >= 0 { NaiveDate::MAX } else { NaiveDate::MIN };
    };

    NaiveDate::from_ymd_opt(year, month, date.day().min(last)).unwrap_or(if year >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Number of days in `[a, b]`, counting both ends: `(b - a) + 1`.
///
/// Callers must never pass `b < a`; chained data never produces it, so an
/// inverted span is treated as a logic defect and asserted in debug builds.
#[must_use]
pub fn inclusive_day_count(a: NaiveDate, b: NaiveDate) -> i64 {
    debug_assert!(b >= a, "inverted span: {b} is before {a}");
    (b - a).num_days() + 1
}

/// Subtracts a calendar duration from a date: years and months first (with
/// end-of-month clamping), then days.
///
/// Used to credit time back from a known end date.
#[must_use]
pub fn subtract_duration(date: NaiveDate, years: u32, months: u32, days: u32) -> NaiveDate {
    let back = add_years_months(date, -i64::from(years), -i64::from(months));
    add_days(back, -i64::from(days))
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => Some((next - first).num_days() as u32),
        // December of the last representable year.
        None => Some(31),
    }
}
