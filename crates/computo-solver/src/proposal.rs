//! Allocation proposal types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Position of a cause in the list handed to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CauseId(pub usize);

impl std::fmt::Display for CauseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// How a credit budget is spread over causes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionMode {
    /// Longest causes first, each filled to capacity.
    #[default]
    MostSevereFirst,
    /// Shares proportional to gross duration, shortfall filled most-severe-first.
    Proportional,
}

/// What the caller wants to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditRequest {
    /// Distribute exactly this many additional days of credit.
    Budget(u32),
    /// Find the additional credit that moves the completion date here.
    TargetDate(NaiveDate),
}

/// Proposed credit for one cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalItem {
    pub cause: CauseId,
    pub proposed: i64,
    /// Gross duration minus credit already on the cause.
    pub capacity: i64,
    /// Whether the proposal used the cause's whole capacity.
    pub capped: bool,
}

/// How a target-date search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The simulated completion date equals the target.
    Exact { completion: NaiveDate },
    /// Matched after retrying with the budget moved by `delta` days.
    Adjusted { completion: NaiveDate, delta: i64 },
    /// No candidate matched; this is the closest simulation.
    BestEffort { completion: Option<NaiveDate> },
}

impl TargetOutcome {
    #[must_use]
    pub fn is_exact(&self) -> bool {
        !matches!(self, TargetOutcome::BestEffort { .. })
    }
}

/// A proposed credit allocation. Never applied automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationProposal {
    /// One item per cause, in the caller's order.
    pub items: Vec<ProposalItem>,
    pub requested: i64,
    pub allocated: i64,
    pub remaining: i64,
    pub mode: DistributionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TargetOutcome>,
}

impl AllocationProposal {
    /// Proposed credit per cause, in the caller's order.
    #[must_use]
    pub fn proposed(&self) -> Vec<i64> {
        self.items.iter().map(|i| i.proposed).collect()
    }
}
