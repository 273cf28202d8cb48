//! Serializable round wrapper for typestate phases.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::phases::{Outcome, Phase};
use crate::typestate::{
    RoundConcluded, RoundRevealing, RoundSetup, RoundState, RoundVoting, TurnResult, VoteResult,
};
use serde::{Deserialize, Serialize};

/// A round in any phase.
///
/// Typestate phases are distinct types, so a long-lived owner (the session)
/// keeps whichever one is current in this enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyRound {
    /// No round dealt yet.
    Setup(RoundSetup),
    /// Players are viewing their words.
    Revealing(RoundRevealing),
    /// Players are voting.
    Voting(RoundVoting),
    /// Round over.
    Concluded(RoundConcluded),
}

impl Default for AnyRound {
    fn default() -> Self {
        AnyRound::Setup(RoundSetup::new(GameConfig::default()))
    }
}

impl From<RoundSetup> for AnyRound {
    fn from(round: RoundSetup) -> Self {
        AnyRound::Setup(round)
    }
}

impl From<RoundRevealing> for AnyRound {
    fn from(round: RoundRevealing) -> Self {
        AnyRound::Revealing(round)
    }
}

impl From<RoundVoting> for AnyRound {
    fn from(round: RoundVoting) -> Self {
        AnyRound::Voting(round)
    }
}

impl From<RoundConcluded> for AnyRound {
    fn from(round: RoundConcluded) -> Self {
        AnyRound::Concluded(round)
    }
}

impl From<TurnResult> for AnyRound {
    fn from(result: TurnResult) -> Self {
        match result {
            TurnResult::Revealing(round) => round.into(),
            TurnResult::Voting(round) => round.into(),
        }
    }
}

impl From<VoteResult> for AnyRound {
    fn from(result: VoteResult) -> Self {
        match result {
            VoteResult::Voting(round, _) => round.into(),
            VoteResult::Concluded(round, _) => round.into(),
        }
    }
}

impl AnyRound {
    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        match self {
            AnyRound::Setup(_) => Phase::Configuring,
            AnyRound::Revealing(_) => Phase::Revealing,
            AnyRound::Voting(_) => Phase::Voting,
            AnyRound::Concluded(_) => Phase::Concluded,
        }
    }

    /// Returns the configuration for any phase.
    pub fn config(&self) -> &GameConfig {
        match self {
            AnyRound::Setup(round) => round.config(),
            AnyRound::Revealing(round) => round.config(),
            AnyRound::Voting(round) => round.config(),
            AnyRound::Concluded(round) => round.config(),
        }
    }

    /// Returns the round state, if a round has been dealt.
    pub fn state(&self) -> Option<&RoundState> {
        match self {
            AnyRound::Setup(_) => None,
            AnyRound::Revealing(round) => Some(round.state()),
            AnyRound::Voting(round) => Some(round.state()),
            AnyRound::Concluded(round) => Some(round.state()),
        }
    }

    /// Checks a round that came from outside, such as a deserialized save.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidConfiguration`] if the configuration is out of bounds.
    /// - [`GameError::InvariantViolation`] if the round state is inconsistent.
    pub fn validate(&self) -> Result<(), GameError> {
        self.config().validate()?;
        match self.state() {
            Some(state) => state.validate(),
            None => Ok(()),
        }
    }

    /// Returns the outcome, if the round is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            AnyRound::Concluded(round) => Some(*round.outcome()),
            _ => None,
        }
    }

    /// Returns true if the round is over.
    pub fn is_over(&self) -> bool {
        matches!(self, AnyRound::Concluded(_))
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match self {
            AnyRound::Setup(round) => format!(
                "Ready to start: {} players, {} undercover",
                round.config().player_count(),
                round.config().minority_count()
            ),
            AnyRound::Revealing(round) => format!(
                "{} of {}: {} is viewing their word",
                round.state().current_turn() + 1,
                round.state().player_count(),
                round.current_player()
            ),
            AnyRound::Voting(round) => format!(
                "Voting. {} undercover still hidden",
                round.state().remaining_minority()
            ),
            AnyRound::Concluded(round) => format!("Round over. {}", round.outcome()),
        }
    }
}
