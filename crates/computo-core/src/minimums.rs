//! Minimum-term pipeline: effective base → TM → TMBI → CET.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, add_years_months, inclusive_day_count};
use crate::config::{ChainConfig, Ratio, Regime, View};

/// Manually entered milestones that replace computed ones downstream.
///
/// A TM override becomes the source of TMBI; a TMBI override becomes the
/// source of CET. Neither changes the TM day count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumOverrides {
    pub tm: Option<NaiveDate>,
    pub tmbi: Option<NaiveDate>,
}

/// Base day counts derived from the chain totals and the global credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    /// Credited total minus the global credit, always. Drives the
    /// completion date.
    pub termination_days: i64,
    /// Credited total minus the global credit only when it applies to
    /// minimums. Drives TM/TMBI/CET.
    pub effective_days: i64,
    /// Global credit actually subtracted from the minimums base.
    pub global_credit_applied: i64,
}

impl Bases {
    #[must_use]
    pub fn new(total_credited_days: i64, config: &ChainConfig) -> Self {
        let global = i64::from(config.global_credit_days);
        let global_credit_applied = if config.apply_global_credit_to_minimums {
            global
        } else {
            0
        };
        Self {
            termination_days: (total_credited_days - global).max(0),
            effective_days: (total_credited_days - global_credit_applied).max(0),
            global_credit_applied,
        }
    }

    /// `start + (termination_days - 1)`, or `None` when nothing is left to
    /// serve.
    #[must_use]
    pub fn completion_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        day_n(start, self.termination_days)
    }
}

/// TM, TMBI and CET for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumTerms {
    pub tm_fraction: f64,
    pub tm_days: i64,
    pub tm_inclusive_date: Option<NaiveDate>,
    pub tm_view_date: Option<NaiveDate>,
    pub tmbi_date: Option<NaiveDate>,
    pub start_to_tmbi_days: i64,
    pub cet_fraction: f64,
    pub cet_days: i64,
    pub cet_inclusive_date: Option<NaiveDate>,
    pub cet_view_date: Option<NaiveDate>,
}

/// Runs the pipeline over an effective base of `effective_days`.
#[must_use]
pub fn minimum_terms(
    start: NaiveDate,
    effective_days: i64,
    regime: Regime,
    config: &ChainConfig,
    overrides: &MinimumOverrides,
) -> MinimumTerms {
    let ratio = regime.ratio();
    let tm_fraction = ratio.fraction_of(effective_days);
    let tm_days = ratio.apply(effective_days, config.rounding);
    let tm_inclusive_date = day_n(start, tm_days);
    let tm_view_date = tm_inclusive_date.map(|d| match config.view {
        View::Official => add_days(d, 1),
        View::Doctrinal => d,
    });

    let tm_source = overrides.tm.or(tm_view_date);
    let tmbi_date = overrides
        .tmbi
        .or_else(|| tm_source.map(|tm| add_years_months(tm, -1, 0)));

    let start_to_tmbi_days = match tmbi_date {
        Some(tmbi) if tmbi >= start => inclusive_day_count(start, tmbi),
        _ => 0,
    };

    let cet_fraction = Ratio::TWO_THIRDS.fraction_of(start_to_tmbi_days);
    let cet_days = Ratio::TWO_THIRDS.apply(start_to_tmbi_days, config.rounding);
    let cet_inclusive_date = day_n(start, cet_days);
    let cet_view_date = cet_inclusive_date.map(|d| match config.view {
        View::Official => add_days(d, -1),
        View::Doctrinal => d,
    });

    MinimumTerms {
        tm_fraction,
        tm_days,
        tm_inclusive_date,
        tm_view_date,
        tmbi_date,
        start_to_tmbi_days,
        cet_fraction,
        cet_days,
        cet_inclusive_date,
        cet_view_date,
    }
}

/// The `n`-th day of a span starting on `start` (day 1 is `start`).
fn day_n(start: NaiveDate, n: i64) -> Option<NaiveDate> {
    (n > 0).then(|| add_days(start, n - 1))
}
