//! Roles aligned invariant: one role, one eligibility flag per seated player.

use super::Invariant;
use crate::typestate::RoundState;

/// Invariant: roles, eligibility and players line up by index.
///
/// `len(roles) == len(eligible) == len(players)`, and player `i` sits in seat `i`.
pub struct RolesAlignedInvariant;

impl Invariant<RoundState> for RolesAlignedInvariant {
    fn holds(state: &RoundState) -> bool {
        let players = state.players();

        state.roles().len() == players.len()
            && state.eligible().len() == players.len()
            && players
                .iter()
                .enumerate()
                .all(|(seat, player)| *player.index() == seat)
    }

    fn description() -> &'static str {
        "Every player has exactly one role and one eligibility flag, in seat order"
    }
}
