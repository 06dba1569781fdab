//! # computo-solver
//!
//! Credit-distribution solver. Given a credit budget or a target completion
//! date, proposes how much additional credit each cause should receive.
//!
//! Includes:
//! - Capacity and severity ordering over a chained cause list
//! - Most-severe-first and proportional allocation
//! - Target-date search with a single ±1-day retry
//! - Applying a proposal to a copy of the cause list
//!
//! Proposals never mutate their inputs; callers decide whether to apply them.

pub mod allocation;
pub mod apply;
pub mod proposal;
pub mod target;

pub use allocation::{allocate, capacities, severity_order, CauseCapacity};
pub use apply::{apply_proposal, ApplyMode};
pub use proposal::{
    AllocationProposal, CauseId, CreditRequest, DistributionMode, ProposalItem, TargetOutcome,
};
pub use target::propose_credits;
