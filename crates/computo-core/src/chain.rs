//! The chaining engine.
//!
//! Walks causes in the caller's order over two timelines: the gross
//! timeline (no credit) and the credited timeline (per-cause credit applied).
//! Gross durations are always measured on the gross timeline, so credit on
//! one cause never changes the gross duration of the causes after it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calendar::add_days;
use crate::cause::{cause_duration, Cause};
use crate::config::ChainMode;

/// How one cause was laid out on both timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseSpan {
    /// Position of the cause in the chained order.
    pub index: usize,
    pub gross_start: NaiveDate,
    pub gross_end: NaiveDate,
    pub gross_days: i64,
    /// Credit as entered on the cause.
    pub requested_credit: u32,
    /// Credit actually applied, clamped to `[0, gross_days]`.
    pub applied_credit: i64,
    pub credited_start: NaiveDate,
    /// For a fully credited cause this is the day before `credited_start`.
    pub credited_end: NaiveDate,
    pub credited_days: i64,
}

/// Aggregate outcome of chaining a list of causes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOutcome {
    pub spans: Vec<CauseSpan>,
    pub gross_end: NaiveDate,
    pub credited_end: NaiveDate,
    pub total_gross_days: i64,
    pub total_credited_days: i64,
}

impl ChainOutcome {
    /// Sum of credit actually applied across all causes.
    #[must_use]
    pub fn total_applied_credit(&self) -> i64 {
        self.spans.iter().map(|s| s.applied_credit).sum()
    }
}

/// Chains `causes` from `start` under `mode`.
///
/// An empty list yields zero totals with both end dates equal to `start`.
#[must_use]
pub fn chain(start: NaiveDate, causes: &[Cause], mode: ChainMode) -> ChainOutcome {
    let mut gross_cursor = start;
    let mut credited_cursor = start;
    let mut outcome = ChainOutcome {
        spans: Vec::with_capacity(causes.len()),
        gross_end: start,
        credited_end: start,
        total_gross_days: 0,
        total_credited_days: 0,
    };

    for (index, cause) in causes.iter().enumerate() {
        let gross_end = cause.end_from(gross_cursor);
        let gross_days = cause_duration(gross_cursor, cause);

        let applied_credit = i64::from(cause.credit_days).clamp(0, gross_days);
        let credited_days = gross_days - applied_credit;
        let credited_end = add_days(credited_cursor, credited_days - 1);

        trace!(
            index,
            gross_days,
            applied_credit,
            credited_days,
            %gross_end,
            %credited_end,
            "chained cause"
        );

        outcome.spans.push(CauseSpan {
            index,
            gross_start: gross_cursor,
            gross_end,
            gross_days,
            requested_credit: cause.credit_days,
            applied_credit,
            credited_start: credited_cursor,
            credited_end,
            credited_days,
        });
        outcome.total_gross_days += gross_days;
        outcome.total_credited_days += credited_days;
        outcome.gross_end = gross_end;
        outcome.credited_end = credited_end;

        (gross_cursor, credited_cursor) = match mode {
            ChainMode::NextDay => (add_days(gross_end, 1), add_days(credited_end, 1)),
            ChainMode::SameDay => (gross_end, credited_end),
        };
    }

    outcome
}
