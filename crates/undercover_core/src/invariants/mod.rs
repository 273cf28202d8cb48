//! First-class invariants for a round.
//!
//! Invariants are logical properties that must hold from the moment a round
//! starts until it is discarded. They are checked after every transition in
//! debug builds and can be tested independently.

use crate::typestate::RoundState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

// Implement InvariantSet for 4-tuples
impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod eligibility_consistent;
pub mod minority_count;
pub mod roles_aligned;
pub mod turn_bounds;

pub use eligibility_consistent::EligibilityConsistentInvariant;
pub use minority_count::MinorityCountInvariant;
pub use roles_aligned::RolesAlignedInvariant;
pub use turn_bounds::TurnBoundsInvariant;

/// All round invariants as a composable set.
pub type RoundInvariants = (
    RolesAlignedInvariant,
    MinorityCountInvariant,
    TurnBoundsInvariant,
    EligibilityConsistentInvariant,
);

/// Runs [`RoundInvariants`] and folds any violations into one message.
pub(crate) fn check_round(state: &RoundState) -> Result<(), String> {
    RoundInvariants::check_all(state).map_err(|violations| {
        violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::GameConfig;
    use crate::language::Language;
    use crate::lexicon::Lexicon;
    use crate::rng::GameRng;
    use crate::typestate::{RoundSetup, RoundState};

    /// A freshly started round's state.
    pub(crate) fn fresh_state(players: usize, minority: usize) -> RoundState {
        let config = GameConfig::new(players, minority, Vec::new(), Language::English).unwrap();
        let lexicon = Lexicon::new([("colors", vec!["red".to_string(), "blue".to_string()])]);
        RoundSetup::new(config)
            .start(&lexicon, &mut GameRng::new(21))
            .unwrap()
            .state()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::fresh_state;
    use super::*;

    #[test]
    fn test_invariant_set_holds_for_fresh_round() {
        let state = fresh_state(6, 2);
        assert!(RoundInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut state = fresh_state(6, 2);
        state.roles.pop();
        state.remaining_minority = 5;

        let violations = RoundInvariants::check_all(&state).unwrap_err();
        assert!(violations.len() >= 2);
        assert!(check_round(&state).unwrap_err().contains("; "));
    }

    #[test]
    fn test_two_invariants_as_set() {
        let state = fresh_state(3, 1);

        type TwoInvariants = (RolesAlignedInvariant, TurnBoundsInvariant);
        assert!(TwoInvariants::check_all(&state).is_ok());
    }
}
