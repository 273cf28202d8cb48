//! Errors raised by the game core.
//!
//! Every error here is local and recoverable: a front end reports it and
//! asks the user again.

use crate::phases::Phase;

/// Error that can occur when configuring, starting or playing a round.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Player or minority count out of bounds, or malformed player names.
    #[display("Invalid configuration: {}", reason)]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// No lexicon category has at least two words.
    #[display("No category with at least two words")]
    NoValidCategory,

    /// The lexicon resource could not be parsed.
    #[display("Invalid lexicon: {}", reason)]
    InvalidLexicon {
        /// Parser message.
        reason: String,
    },

    /// The vote target is out of range or has already been voted on.
    #[display("Player {} cannot be voted on", index + 1)]
    InvalidVoteTarget {
        /// Index that was voted on.
        index: usize,
    },

    /// The operation does not apply to the current phase.
    #[display("Expected {} phase, but the round is in {} phase", expected, actual)]
    WrongPhase {
        /// Phase the operation needs.
        expected: Phase,
        /// Phase the session is in.
        actual: Phase,
    },

    /// A round invariant failed after a transition (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

impl GameError {
    /// Shorthand for [`GameError::InvalidConfiguration`].
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GameError::invalid_configuration("2 players is below the minimum of 3");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: 2 players is below the minimum of 3"
        );

        // seat index 4 is the fifth player
        let err = GameError::InvalidVoteTarget { index: 4 };
        assert_eq!(err.to_string(), "Player 5 cannot be voted on");

        let err = GameError::WrongPhase {
            expected: Phase::Voting,
            actual: Phase::Revealing,
        };
        assert_eq!(
            err.to_string(),
            "Expected Voting phase, but the round is in Revealing phase"
        );
    }
}
