//! Causes and the cause-span calculator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, add_years_months, inclusive_day_count};
use crate::config::Regime;

/// A sentence segment: a calendar-relative duration plus credit that applies
/// to this segment only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cause {
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub months: u32,
    #[serde(default)]
    pub days: u32,
    /// Days subtracted from this cause only. Clamped to its gross duration.
    #[serde(default)]
    pub credit_days: u32,
    /// Regime the cause was sentenced under, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regime: Option<Regime>,
}

impl Cause {
    #[must_use]
    pub fn new(years: u32, months: u32, days: u32) -> Self {
        Self {
            years,
            months,
            days,
            ..Self::default()
        }
    }

    /// Builds a cause from raw signed components, treating negatives as zero.
    #[must_use]
    pub fn from_signed(years: i64, months: i64, days: i64, credit_days: i64) -> Self {
        let clamp = |v: i64| u32::try_from(v.max(0)).unwrap_or(u32::MAX);
        Self {
            years: clamp(years),
            months: clamp(months),
            days: clamp(days),
            credit_days: clamp(credit_days),
            regime: None,
        }
    }

    #[must_use]
    pub fn with_credit(mut self, credit_days: u32) -> Self {
        self.credit_days = credit_days;
        self
    }

    #[must_use]
    pub fn with_regime(mut self, regime: Regime) -> Self {
        self.regime = Some(regime);
        self
    }

    /// Last day of this cause when served from `cursor`.
    #[must_use]
    pub fn end_from(&self, cursor: NaiveDate) -> NaiveDate {
        cause_end(cursor, self.years, self.months, self.days)
    }

    /// Gross inclusive duration of this cause when served from `cursor`.
    #[must_use]
    pub fn duration_from(&self, cursor: NaiveDate) -> i64 {
        cause_duration(cursor, self)
    }
}

/// End date of a cause of `years/months/days` starting on `cursor`.
///
/// Year/month durations land on the inclusive boundary through month
/// arithmetic and then add `days` whole days. A days-only cause of length
/// `D` ends `D - 1` days after its start. The two paths are intentionally
/// asymmetric and must stay that way.
#[must_use]
pub fn cause_end(cursor: NaiveDate, years: u32, months: u32, days: u32) -> NaiveDate {
    if years == 0 && months == 0 {
        add_days(cursor, i64::from(days.saturating_sub(1)))
    } else {
        let calendar_end = add_years_months(cursor, i64::from(years), i64::from(months));
        add_days(calendar_end, i64::from(days))
    }
}

/// Gross inclusive duration of `cause` starting on `cursor`.
#[must_use]
pub fn cause_duration(cursor: NaiveDate, cause: &Cause) -> i64 {
    inclusive_day_count(cursor, cause.end_from(cursor))
}

/// Reorders causes most-severe-first.
///
/// Severity is each cause's standalone duration measured from `start`.
/// Ties put two-thirds causes first, then keep the original order.
#[must_use]
pub fn order_most_severe_first(start: NaiveDate, causes: &[Cause]) -> Vec<Cause> {
    most_severe_first_indices(start, causes)
        .into_iter()
        .map(|i| causes[i])
        .collect()
}

/// Positions of `causes` in most-severe-first order.
///
/// The key ignores credit, so adding credit to a cause never moves it.
#[must_use]
pub fn most_severe_first_indices(start: NaiveDate, causes: &[Cause]) -> Vec<usize> {
    let keys: Vec<(i64, bool)> = causes
        .iter()
        .map(|c| (cause_duration(start, c), c.regime == Some(Regime::TwoThirds)))
        .collect();
    let mut order: Vec<usize> = (0..causes.len()).collect();
    // sort_by is stable, so equal keys keep caller order.
    order.sort_by(|&a, &b| keys[b].0.cmp(&keys[a].0).then(keys[b].1.cmp(&keys[a].1)));
    order
}
