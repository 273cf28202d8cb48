//! Turn bounds invariant: the turn cursor always points at a seat.

use super::Invariant;
use crate::typestate::RoundState;

/// Invariant: `current_turn < player_count`, and once all turns are
/// complete the card stays hidden on the last seat.
pub struct TurnBoundsInvariant;

impl Invariant<RoundState> for TurnBoundsInvariant {
    fn holds(state: &RoundState) -> bool {
        let turn = *state.current_turn();
        if turn >= state.player_count() {
            return false;
        }

        if *state.turns_complete() {
            return turn + 1 == state.player_count() && !*state.revealed();
        }

        true
    }

    fn description() -> &'static str {
        "Turn index stays within the roster and freezes on the last seat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::test_support::fresh_state;

    #[test]
    fn test_fresh_round_holds() {
        assert!(TurnBoundsInvariant::holds(&fresh_state(3, 1)));
    }

    #[test]
    fn test_turn_past_roster_violates() {
        let mut state = fresh_state(3, 1);
        state.current_turn = 3;
        assert!(!TurnBoundsInvariant::holds(&state));
    }

    #[test]
    fn test_complete_before_last_seat_violates() {
        let mut state = fresh_state(3, 1);
        state.turns_complete = true;
        assert!(!TurnBoundsInvariant::holds(&state));

        state.current_turn = 2;
        assert!(TurnBoundsInvariant::holds(&state));
    }
}
