//! Eligibility invariant: the remaining-minority counter tracks the vote pool.

use super::Invariant;
use crate::typestate::RoundState;

/// Invariant: `remaining_minority` equals the minority players still
/// eligible, and every ineligible player has exactly one recorded vote.
pub struct EligibilityConsistentInvariant;

impl Invariant<RoundState> for EligibilityConsistentInvariant {
    fn holds(state: &RoundState) -> bool {
        let hidden_minority = state
            .roles()
            .iter()
            .zip(state.eligible())
            .filter(|(role, eligible)| **eligible && role.is_minority())
            .count();
        if hidden_minority != *state.remaining_minority() {
            return false;
        }

        let voted_out = state.eligible().iter().filter(|eligible| !**eligible).count();
        if voted_out != state.votes().len() {
            return false;
        }

        state.votes().iter().all(|vote| {
            !state.is_eligible(vote.target) && state.role_of(vote.target) == Some(vote.role)
        })
    }

    fn description() -> &'static str {
        "Remaining minority count matches the minority players still eligible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::test_support::fresh_state;
    use crate::vote::Vote;

    #[test]
    fn test_fresh_round_holds() {
        assert!(EligibilityConsistentInvariant::holds(&fresh_state(5, 2)));
    }

    #[test]
    fn test_recorded_vote_holds() {
        let mut state = fresh_state(5, 2);
        let role = state.roles[3];
        state.eligible[3] = false;
        state.votes.push(Vote { target: 3, role });
        if role.is_minority() {
            state.remaining_minority -= 1;
        }
        assert!(EligibilityConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_counter_drift_violates() {
        let mut state = fresh_state(5, 2);
        state.remaining_minority = 1;
        assert!(!EligibilityConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_unrecorded_removal_violates() {
        let mut state = fresh_state(5, 2);
        let seat = state
            .roles
            .iter()
            .position(|role| !role.is_minority())
            .unwrap();
        state.eligible[seat] = false;
        assert!(!EligibilityConsistentInvariant::holds(&state));
    }
}
