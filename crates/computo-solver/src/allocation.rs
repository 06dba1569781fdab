//! Budget allocation over cause capacities.

use chrono::NaiveDate;
use computo_core::{chain, Cause, ChainMode};

use crate::proposal::{AllocationProposal, CauseId, DistributionMode, ProposalItem};

/// Gross duration and remaining capacity of one cause in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CauseCapacity {
    pub gross_days: i64,
    pub capacity: i64,
}

/// Capacities of `causes` chained from `start`, in the caller's order.
///
/// Capacity is the gross duration minus credit already applied to the cause.
#[must_use]
pub fn capacities(start: NaiveDate, causes: &[Cause], mode: ChainMode) -> Vec<CauseCapacity> {
    chain(start, causes, mode)
        .spans
        .iter()
        .map(|s| CauseCapacity {
            gross_days: s.gross_days,
            capacity: s.gross_days - s.applied_credit,
        })
        .collect()
}

/// Indices ordered by descending gross duration; ties keep caller order.
#[must_use]
pub fn severity_order(caps: &[CauseCapacity]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..caps.len()).collect();
    order.sort_by(|&a, &b| caps[b].gross_days.cmp(&caps[a].gross_days));
    order
}

/// Spreads `budget` days of credit over `caps` under `mode`.
///
/// The allocation never exceeds a cause's capacity nor the budget; whatever
/// cannot be placed is reported as `remaining`.
#[must_use]
pub fn allocate(caps: &[CauseCapacity], budget: i64, mode: DistributionMode) -> AllocationProposal {
    let budget = budget.max(0);
    let mut assigned = vec![0i64; caps.len()];
    let order = severity_order(caps);

    match mode {
        DistributionMode::MostSevereFirst => fill(&mut assigned, caps, &order, budget),
        DistributionMode::Proportional => {
            let total: i64 = caps.iter().map(|c| c.gross_days).sum::<i64>().max(1);
            for (slot, cap) in assigned.iter_mut().zip(caps) {
                *slot = proportional_share(budget, cap.gross_days, total).min(cap.capacity.max(0));
            }

            // Rounding half up can overshoot; take the excess back from the
            // least severe causes.
            let mut excess = assigned.iter().sum::<i64>() - budget;
            for &i in order.iter().rev() {
                if excess <= 0 {
                    break;
                }
                let give_back = assigned[i].min(excess);
                assigned[i] -= give_back;
                excess -= give_back;
            }

            let shortfall = budget - assigned.iter().sum::<i64>();
            fill(&mut assigned, caps, &order, shortfall);
        }
    }

    let allocated: i64 = assigned.iter().sum();
    let items = caps
        .iter()
        .zip(&assigned)
        .enumerate()
        .map(|(i, (cap, &proposed))| ProposalItem {
            cause: CauseId(i),
            proposed,
            capacity: cap.capacity,
            capped: cap.capacity > 0 && proposed == cap.capacity,
        })
        .collect();

    AllocationProposal {
        items,
        requested: budget,
        allocated,
        remaining: budget - allocated,
        mode,
        target: None,
        outcome: None,
    }
}

/// Greedily tops up `assigned` in `order` until `amount` is placed or every
/// capacity is full.
fn fill(assigned: &mut [i64], caps: &[CauseCapacity], order: &[usize], amount: i64) {
    let mut left = amount;
    for &i in order {
        if left <= 0 {
            break;
        }
        let free = (caps[i].capacity - assigned[i]).max(0);
        let take = free.min(left);
        assigned[i] += take;
        left -= take;
    }
}

/// `round_half_up(budget × part / total)` in exact integer arithmetic.
fn proportional_share(budget: i64, part: i64, total: i64) -> i64 {
    let numerator = 2 * i128::from(budget) * i128::from(part) + i128::from(total);
    let share = numerator / (2 * i128::from(total));
    i64::try_from(share).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(list: &[(i64, i64)]) -> Vec<CauseCapacity> {
        list.iter()
            .map(|&(gross_days, capacity)| CauseCapacity {
                gross_days,
                capacity,
            })
            .collect()
    }

    #[test]
    fn capacities_subtract_existing_credit() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let causes = [Cause::new(2, 0, 0).with_credit(32), Cause::new(0, 0, 10)];
        let caps = capacities(start, &causes, ChainMode::NextDay);
        assert_eq!(caps[0], CauseCapacity { gross_days: 732, capacity: 700 });
        assert_eq!(caps[1], CauseCapacity { gross_days: 10, capacity: 10 });
    }

    #[test]
    fn most_severe_first_fills_longest_cause() {
        let p = allocate(&caps(&[(100, 100), (300, 300), (200, 200)]), 350, DistributionMode::MostSevereFirst);
        assert_eq!(p.proposed(), vec![0, 300, 50]);
        assert_eq!(p.allocated, 350);
        assert_eq!(p.remaining, 0);
        assert!(p.items[1].capped);
        assert!(!p.items[2].capped);
    }

    #[test]
    fn severity_ties_keep_caller_order() {
        let p = allocate(&caps(&[(100, 100), (100, 100)]), 150, DistributionMode::MostSevereFirst);
        assert_eq!(p.proposed(), vec![100, 50]);
    }

    #[test]
    fn budget_beyond_capacity_reports_remaining() {
        let p = allocate(&caps(&[(10, 4), (20, 0)]), 30, DistributionMode::MostSevereFirst);
        assert_eq!(p.proposed(), vec![4, 0]);
        assert_eq!(p.allocated, 4);
        assert_eq!(p.remaining, 26);
        assert!(!p.items[1].capped);
    }

    #[test]
    fn proportional_splits_by_duration() {
        let p = allocate(&caps(&[(100, 100), (300, 300)]), 40, DistributionMode::Proportional);
        assert_eq!(p.proposed(), vec![10, 30]);
        assert_eq!(p.remaining, 0);
    }

    #[test]
    fn proportional_redistributes_capped_shortfall() {
        // Shares would be 50/50 but the first cause only has room for 10.
        let p = allocate(&caps(&[(100, 10), (100, 100)]), 100, DistributionMode::Proportional);
        assert_eq!(p.proposed(), vec![10, 90]);
        assert_eq!(p.allocated, 100);
    }

    #[test]
    fn proportional_rounding_never_overshoots_budget() {
        // Each share is round(2/3) = 1, three causes, budget 2.
        let p = allocate(&caps(&[(30, 30), (30, 30), (30, 30)]), 2, DistributionMode::Proportional);
        assert_eq!(p.allocated, 2);
        assert_eq!(p.proposed(), vec![1, 1, 0]);
    }

    #[test]
    fn zero_budget_allocates_nothing() {
        let p = allocate(&caps(&[(30, 30)]), 0, DistributionMode::Proportional);
        assert_eq!(p.proposed(), vec![0]);
        assert_eq!(p.remaining, 0);
    }
}
