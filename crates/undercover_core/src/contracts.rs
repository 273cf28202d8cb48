//! Contract-based validation for round transitions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::config::GameConfig;
use crate::error::GameError;
use crate::invariants::check_round;
use crate::typestate::RoundState;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

fn invariants_hold(state: &RoundState) -> Result<(), GameError> {
    check_round(state).map_err(|descriptions| {
        warn!(%descriptions, "Round invariants violated");
        GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

// ─────────────────────────────────────────────────────────────
//  Start
// ─────────────────────────────────────────────────────────────

/// Contract for starting a round.
///
/// Precondition: the configuration is within bounds.
/// Postcondition: the dealt round satisfies every round invariant and
/// matches the configuration.
pub struct StartContract;

impl StartContract {
    /// Validates the configuration.
    #[instrument(skip_all)]
    pub fn pre(config: &GameConfig) -> Result<(), GameError> {
        config.validate()
    }

    /// Validates a freshly dealt round against its configuration.
    #[instrument(skip_all)]
    pub fn post(config: &GameConfig, state: &RoundState) -> Result<(), GameError> {
        invariants_hold(state)?;

        let fresh = *state.current_turn() == 0
            && !*state.revealed()
            && !*state.turns_complete()
            && state.votes().is_empty()
            && state.player_count() == *config.player_count()
            && *state.minority_count() == *config.minority_count();
        if !fresh {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: round does not match its configuration".to_string(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Turns
// ─────────────────────────────────────────────────────────────

/// Contract for advancing a turn.
///
/// Precondition: turns are still in progress. (The card need not have been
/// flipped.)
///
/// Postcondition: the cursor moved forward by exactly one seat, or stayed on
/// the last seat with turns complete.
pub struct TurnContract;

impl Contract<RoundState, ()> for TurnContract {
    fn pre(state: &RoundState, _action: &()) -> Result<(), GameError> {
        if *state.turns_complete() {
            return Err(GameError::InvariantViolation(
                "Precondition failed: every player has already seen their word".to_string(),
            ));
        }
        Ok(())
    }

    fn post(before: &RoundState, after: &RoundState) -> Result<(), GameError> {
        invariants_hold(after)?;

        let last = before.player_count() - 1;
        let stepped = if *before.current_turn() == last {
            *after.turns_complete() && *after.current_turn() == last
        } else {
            !*after.turns_complete() && *after.current_turn() == *before.current_turn() + 1
        };

        if !stepped || *after.revealed() {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: turn did not advance by exactly one seat".to_string(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Votes
// ─────────────────────────────────────────────────────────────

/// Precondition: the vote target exists and has not been voted on.
pub struct EligibleTarget;

impl EligibleTarget {
    /// Checks that `target` can be voted on.
    #[instrument(skip(state))]
    pub fn check(target: usize, state: &RoundState) -> Result<(), GameError> {
        if state.is_eligible(target) {
            Ok(())
        } else {
            warn!("Vote target is not eligible");
            Err(GameError::InvalidVoteTarget { index: target })
        }
    }
}

/// Contract for casting a vote.
///
/// Preconditions:
/// - Every player has seen their word
/// - Target is eligible
///
/// Postconditions:
/// - Exactly one more vote recorded
/// - Remaining minority dropped by one for a minority target, unchanged otherwise
/// - Round invariants hold
pub struct VoteContract;

impl Contract<RoundState, usize> for VoteContract {
    fn pre(state: &RoundState, target: &usize) -> Result<(), GameError> {
        if !*state.turns_complete() {
            return Err(GameError::InvariantViolation(
                "Precondition failed: voting before every player has seen their word".to_string(),
            ));
        }
        EligibleTarget::check(*target, state)
    }

    fn post(before: &RoundState, after: &RoundState) -> Result<(), GameError> {
        invariants_hold(after)?;

        let Some(vote) = after.votes().last() else {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: vote was not recorded".to_string(),
            ));
        };

        let expected_remaining = if vote.role.is_minority() {
            before.remaining_minority().checked_sub(1)
        } else {
            Some(*before.remaining_minority())
        };

        if after.votes().len() != before.votes().len() + 1
            || expected_remaining != Some(*after.remaining_minority())
        {
            return Err(GameError::InvariantViolation(
                "Postcondition failed: vote bookkeeping is inconsistent".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::test_support::fresh_state;
    use crate::vote::Vote;

    #[test]
    fn test_start_precondition_rejects_bad_config() {
        let config: GameConfig =
            serde_json::from_str(r#"{"player_count":2,"minority_count":1,"names":["",""],"language":"en"}"#)
                .unwrap();
        assert!(matches!(
            StartContract::pre(&config),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_turn_precondition_rejects_finished_turns() {
        let mut state = fresh_state(3, 1);
        state.current_turn = 2;
        state.turns_complete = true;
        assert!(TurnContract::pre(&state, &()).is_err());
    }

    #[test]
    fn test_turn_postcondition_detects_skip() {
        let before = fresh_state(4, 1);
        let mut after = before.clone();
        after.current_turn = 2;
        assert!(TurnContract::post(&before, &after).is_err());

        after.current_turn = 1;
        assert!(TurnContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_vote_precondition_requires_voting_phase() {
        let state = fresh_state(4, 1);
        assert!(matches!(
            VoteContract::pre(&state, &0),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_vote_precondition_checks_target() {
        let mut state = fresh_state(4, 1);
        state.current_turn = 3;
        state.turns_complete = true;

        assert!(VoteContract::pre(&state, &2).is_ok());
        assert_eq!(
            VoteContract::pre(&state, &4),
            Err(GameError::InvalidVoteTarget { index: 4 })
        );
    }

    #[test]
    fn test_vote_postcondition_detects_missing_decrement() {
        let mut before = fresh_state(4, 1);
        before.current_turn = 3;
        before.turns_complete = true;

        let seat = before.roles.iter().position(|r| r.is_minority()).unwrap();
        let mut after = before.clone();
        after.eligible[seat] = false;
        after.votes.push(Vote {
            target: seat,
            role: before.roles[seat],
        });

        // counter not decremented: invariants catch it
        assert!(VoteContract::post(&before, &after).is_err());

        after.remaining_minority = 0;
        assert!(VoteContract::post(&before, &after).is_ok());
    }
}
