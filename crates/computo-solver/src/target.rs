//! Credit proposals for a budget or a target completion date.

use chrono::NaiveDate;
use computo_core::calendar::inclusive_day_count;
use computo_core::{compute, most_severe_first_indices, Cause, ChainConfig, SolverError};
use tracing::{debug, warn};

use crate::allocation::{allocate, capacities, CauseCapacity};
use crate::apply::{apply_proposal, ApplyMode};
use crate::proposal::{
    AllocationProposal, CauseId, CreditRequest, DistributionMode, TargetOutcome,
};

/// Proposes per-cause credit for `request`.
///
/// Causes are simulated in the order `config` chains them, with any existing
/// per-cause credit kept: proposals are additional credit on top of it.
/// Proposal items always refer to positions in `causes` as given.
///
/// # Errors
///
/// Budget requests never fail. Target-date requests return
/// [`SolverError::NoCauses`], [`SolverError::TargetBeforeStart`],
/// [`SolverError::TargetAfterCompletion`] or
/// [`SolverError::InsufficientCapacity`] when the target cannot be reached.
pub fn propose_credits(
    start: NaiveDate,
    causes: &[Cause],
    config: &ChainConfig,
    request: CreditRequest,
    mode: DistributionMode,
) -> Result<AllocationProposal, SolverError> {
    let order = chain_order(start, causes, config);
    let chained: Vec<Cause> = order.iter().map(|&i| causes[i]).collect();
    let caps = capacities(start, &chained, config.chain_mode);

    match request {
        CreditRequest::Budget(budget) => {
            let proposal = allocate_in_caller_order(&caps, &order, i64::from(budget), mode);
            debug!(
                requested = proposal.requested,
                allocated = proposal.allocated,
                remaining = proposal.remaining,
                ?mode,
                "allocated credit budget"
            );
            Ok(proposal)
        }
        CreditRequest::TargetDate(target) => {
            search_target(start, causes, config, &caps, &order, target, mode)
        }
    }
}

/// Caller positions in the order `config` chains the causes.
fn chain_order(start: NaiveDate, causes: &[Cause], config: &ChainConfig) -> Vec<usize> {
    if config.order_most_severe_first {
        most_severe_first_indices(start, causes)
    } else {
        (0..causes.len()).collect()
    }
}

/// Allocates over chain-ordered capacities, then renumbers the items to the
/// caller's positions.
fn allocate_in_caller_order(
    caps: &[CauseCapacity],
    order: &[usize],
    budget: i64,
    mode: DistributionMode,
) -> AllocationProposal {
    let mut proposal = allocate(caps, budget, mode);
    for item in &mut proposal.items {
        item.cause = CauseId(order[item.cause.0]);
    }
    proposal.items.sort_by_key(|item| item.cause);
    proposal
}

fn search_target(
    start: NaiveDate,
    causes: &[Cause],
    config: &ChainConfig,
    caps: &[CauseCapacity],
    order: &[usize],
    target: NaiveDate,
    mode: DistributionMode,
) -> Result<AllocationProposal, SolverError> {
    if causes.is_empty() {
        return Err(SolverError::NoCauses);
    }
    if target < start {
        return Err(SolverError::TargetBeforeStart {
            start: dmy(start),
            target: dmy(target),
        });
    }

    let current = compute(start, causes, config);
    let wanted_base = inclusive_day_count(start, target);
    let budget = current.termination_base_days - wanted_base;
    if budget < 0 {
        return Err(SolverError::TargetAfterCompletion {
            current: current
                .completion_date
                .map_or_else(|| "none".to_string(), dmy),
            target: dmy(target),
        });
    }

    let capacity: i64 = caps.iter().map(|c| c.capacity).sum();
    if budget > capacity {
        return Err(SolverError::InsufficientCapacity {
            required: budget,
            capacity,
        });
    }

    let simulate = |budget: i64| {
        let proposal = allocate_in_caller_order(caps, order, budget, mode);
        let candidate = apply_proposal(causes, &proposal, ApplyMode::Add);
        let completion = compute(start, &candidate, config).completion_date;
        (proposal, completion)
    };

    let (first, first_completion) = simulate(budget);
    debug!(budget, ?first_completion, %target, "simulated target candidate");
    if first_completion == Some(target) {
        return Ok(finish(first, target, TargetOutcome::Exact { completion: target }));
    }

    let delta = retry_delta(first_completion, target);
    if delta != 0 && (0..=capacity).contains(&(budget + delta)) {
        let (retry, retry_completion) = simulate(budget + delta);
        debug!(budget = budget + delta, ?retry_completion, "retried target candidate");
        if retry_completion == Some(target) {
            return Ok(finish(
                retry,
                target,
                TargetOutcome::Adjusted {
                    completion: target,
                    delta,
                },
            ));
        }
    }

    warn!(%target, ?first_completion, "credit proposal does not match the target exactly");
    Ok(finish(
        first,
        target,
        TargetOutcome::BestEffort {
            completion: first_completion,
        },
    ))
}

/// Budget nudge for a simulated completion one day off `target`.
///
/// Ending a day early needs one day less credit, ending a day late one day
/// more. Anything else gets no retry.
fn retry_delta(completion: Option<NaiveDate>, target: NaiveDate) -> i64 {
    match completion {
        Some(c) if c.succ_opt() == Some(target) => -1,
        Some(c) if c.pred_opt() == Some(target) => 1,
        _ => 0,
    }
}

fn finish(
    mut proposal: AllocationProposal,
    target: NaiveDate,
    outcome: TargetOutcome,
) -> AllocationProposal {
    proposal.target = Some(target);
    proposal.outcome = Some(outcome);
    proposal
}

fn dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
