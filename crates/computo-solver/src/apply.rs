//! Applying a proposal to a cause list.

use computo_core::Cause;

use crate::proposal::AllocationProposal;

/// How proposed credit combines with credit already on a cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplyMode {
    /// Proposed credit is added to the existing credit.
    #[default]
    Add,
    /// Proposed credit replaces the existing credit.
    Replace,
}

/// Returns a copy of `causes` with `proposal` applied. The input is untouched.
///
/// Causes without an item in the proposal are returned unchanged.
#[must_use]
pub fn apply_proposal(causes: &[Cause], proposal: &AllocationProposal, mode: ApplyMode) -> Vec<Cause> {
    let mut out = causes.to_vec();
    for item in &proposal.items {
        let Some(cause) = out.get_mut(item.cause.0) else {
            continue;
        };
        let proposed = u32::try_from(item.proposed.max(0)).unwrap_or(u32::MAX);
        cause.credit_days = match mode {
            ApplyMode::Add => cause.credit_days.saturating_add(proposed),
            ApplyMode::Replace => proposed,
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::{CauseId, DistributionMode, ProposalItem};

    fn proposal(values: &[i64]) -> AllocationProposal {
        AllocationProposal {
            items: values
                .iter()
                .enumerate()
                .map(|(i, &proposed)| ProposalItem {
                    cause: CauseId(i),
                    proposed,
                    capacity: 1000,
                    capped: false,
                })
                .collect(),
            requested: values.iter().sum(),
            allocated: values.iter().sum(),
            remaining: 0,
            mode: DistributionMode::MostSevereFirst,
            target: None,
            outcome: None,
        }
    }

    #[test]
    fn add_mode_keeps_existing_credit() {
        let causes = [Cause::new(1, 0, 0).with_credit(10), Cause::new(0, 6, 0)];
        let out = apply_proposal(&causes, &proposal(&[5, 7]), ApplyMode::Add);
        assert_eq!(out[0].credit_days, 15);
        assert_eq!(out[1].credit_days, 7);
        assert_eq!(causes[0].credit_days, 10);
    }

    #[test]
    fn replace_mode_overwrites_existing_credit() {
        let causes = [Cause::new(1, 0, 0).with_credit(10)];
        let out = apply_proposal(&causes, &proposal(&[5]), ApplyMode::Replace);
        assert_eq!(out[0].credit_days, 5);
    }

    #[test]
    fn items_beyond_the_list_are_ignored() {
        let causes = [Cause::new(1, 0, 0)];
        let out = apply_proposal(&causes, &proposal(&[5, 9]), ApplyMode::Add);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].credit_days, 5);
    }
}
