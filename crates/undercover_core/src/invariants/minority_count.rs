//! Minority count invariant: the number of minority roles matches the deal.

use super::Invariant;
use crate::typestate::RoundState;

/// Invariant: exactly `minority_count` players hold the minority role.
pub struct MinorityCountInvariant;

impl Invariant<RoundState> for MinorityCountInvariant {
    fn holds(state: &RoundState) -> bool {
        let dealt = state.roles().iter().filter(|role| role.is_minority()).count();
        dealt == *state.minority_count()
    }

    fn description() -> &'static str {
        "Exactly minority_count players hold the minority role"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::test_support::fresh_state;
    use crate::role::Role;

    #[test]
    fn test_fresh_round_holds() {
        assert!(MinorityCountInvariant::holds(&fresh_state(9, 4)));
    }

    #[test]
    fn test_flipped_role_violates() {
        let mut state = fresh_state(5, 1);
        let seat = state
            .roles
            .iter()
            .position(|role| !role.is_minority())
            .unwrap();
        state.roles[seat] = Role::Minority;
        assert!(!MinorityCountInvariant::holds(&state));
    }
}
