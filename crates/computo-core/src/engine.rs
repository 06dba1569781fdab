//! The computation entry point and its result record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::add_days;
use crate::cause::{order_most_severe_first, Cause};
use crate::chain::{chain, CauseSpan};
use crate::coherence::{self, CoherenceWarning, Milestones};
use crate::config::{ChainConfig, Regime};
use crate::minimums::{minimum_terms, Bases, MinimumOverrides};

/// Everything one computation needs, built once and passed by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expedient {
    pub start: NaiveDate,
    #[serde(default)]
    pub causes: Vec<Cause>,
    #[serde(default)]
    pub config: ChainConfig,
    #[serde(default)]
    pub overrides: MinimumOverrides,
}

impl Expedient {
    #[must_use]
    pub fn new(start: NaiveDate, causes: Vec<Cause>, config: ChainConfig) -> Self {
        Self {
            start,
            causes,
            config,
            overrides: MinimumOverrides::default(),
        }
    }

    #[must_use]
    pub fn compute(&self) -> ComputationResult {
        compute_with_overrides(self.start, &self.causes, &self.config, &self.overrides)
    }
}

/// The engine's sole output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub start: NaiveDate,
    pub regime: Regime,
    pub suggested_regime: Regime,

    // === Chain totals ===
    pub gross_total_days: i64,
    pub credited_total_days: i64,
    pub per_cause_credit_days: i64,
    pub global_credit_days: i64,
    pub global_credit_applied_to_minimums: i64,
    pub termination_base_days: i64,
    pub effective_base_days: i64,
    pub completion_date: Option<NaiveDate>,
    pub gross_chain_end: NaiveDate,
    pub credited_chain_end: NaiveDate,

    // === TM / TMBI ===
    pub tm_fraction: f64,
    pub tm_days: i64,
    pub tm_inclusive_date: Option<NaiveDate>,
    pub tm_view_date: Option<NaiveDate>,
    /// TM as displayed: the override if any, shifted by the TM adjustment.
    pub tm_display_date: Option<NaiveDate>,
    pub tmbi_date: Option<NaiveDate>,
    pub start_to_tmbi_days: i64,

    // === CET ===
    pub cet_fraction: f64,
    pub cet_days: i64,
    pub cet_inclusive_date: Option<NaiveDate>,
    pub cet_view_date: Option<NaiveDate>,
    pub cet_display_date: Option<NaiveDate>,

    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CoherenceWarning>,
    pub spans: Vec<CauseSpan>,
}

/// Computes the completion date and minimum milestones of an expedient.
///
/// Pure: identical inputs always produce identical output. Degenerate
/// inputs (no causes, nothing left after credit) produce `valid = false`
/// rather than an error.
#[must_use]
pub fn compute(start: NaiveDate, causes: &[Cause], config: &ChainConfig) -> ComputationResult {
    compute_with_overrides(start, causes, config, &MinimumOverrides::default())
}

/// [`compute`] with manually entered TM/TMBI dates.
#[must_use]
pub fn compute_with_overrides(
    start: NaiveDate,
    causes: &[Cause],
    config: &ChainConfig,
    overrides: &MinimumOverrides,
) -> ComputationResult {
    let ordered;
    let causes = if config.order_most_severe_first {
        ordered = order_most_severe_first(start, causes);
        ordered.as_slice()
    } else {
        causes
    };

    let outcome = chain(start, causes, config.chain_mode);
    let bases = Bases::new(outcome.total_credited_days, config);
    let completion_date = bases.completion_date(start);
    let terms = minimum_terms(start, bases.effective_days, config.regime, config, overrides);

    let tm_display_date = overrides
        .tm
        .or(terms.tm_view_date)
        .map(|d| add_days(d, i64::from(config.adjustments.tm_days)));
    let cet_display_date = terms
        .cet_view_date
        .map(|d| add_days(d, i64::from(config.adjustments.cet_days)));

    let global_credit_days = i64::from(config.global_credit_days);
    let warnings = coherence::check(&Milestones {
        start,
        completion: completion_date,
        tm: overrides.tm.or(terms.tm_view_date),
        tmbi: terms.tmbi_date,
        cet: terms.cet_view_date,
        credited_total: outcome.total_credited_days,
        global_credit: global_credit_days,
    });
    for warning in &warnings {
        warn!(%warning, "coherence check");
    }

    let valid = !causes.is_empty() && bases.termination_days > 0;

    debug!(
        causes = causes.len(),
        gross = outcome.total_gross_days,
        credited = outcome.total_credited_days,
        effective = bases.effective_days,
        tm_days = terms.tm_days,
        cet_days = terms.cet_days,
        valid,
        "computed expedient"
    );

    ComputationResult {
        start,
        regime: config.regime,
        suggested_regime: Regime::suggested_for(causes),
        gross_total_days: outcome.total_gross_days,
        credited_total_days: outcome.total_credited_days,
        per_cause_credit_days: outcome.total_applied_credit(),
        global_credit_days,
        global_credit_applied_to_minimums: bases.global_credit_applied,
        termination_base_days: bases.termination_days,
        effective_base_days: bases.effective_days,
        completion_date,
        gross_chain_end: outcome.gross_end,
        credited_chain_end: outcome.credited_end,
        tm_fraction: terms.tm_fraction,
        tm_days: terms.tm_days,
        tm_inclusive_date: terms.tm_inclusive_date,
        tm_view_date: terms.tm_view_date,
        tm_display_date,
        tmbi_date: terms.tmbi_date,
        start_to_tmbi_days: terms.start_to_tmbi_days,
        cet_fraction: terms.cet_fraction,
        cet_days: terms.cet_days,
        cet_inclusive_date: terms.cet_inclusive_date,
        cet_view_date: terms.cet_view_date,
        cet_display_date,
        valid,
        warnings,
        spans: outcome.spans,
    }
}
