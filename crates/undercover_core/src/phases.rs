//! Round phases and outcomes.

use serde::{Deserialize, Serialize};

/// Phase of a game session.
///
/// `Configuring → Revealing → Voting → Concluded → Configuring`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Phase {
    /// Counts and names are adjustable; no round exists.
    Configuring,
    /// Players view their words one at a time.
    Revealing,
    /// Players vote on who holds the different word.
    Voting,
    /// The round is over.
    Concluded,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every minority player was voted out.
    MinorityCaught,
    /// Every majority player was voted out while minority players remained hidden.
    MinorityWins {
        /// Minority players never caught.
        survivors: usize,
    },
}

impl Outcome {
    /// Returns true if the majority found every minority player.
    pub fn majority_won(&self) -> bool {
        matches!(self, Outcome::MinorityCaught)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::MinorityCaught => write!(f, "All undercover players caught"),
            Outcome::MinorityWins { survivors } => {
                write!(f, "Undercover players win ({} never caught)", survivors)
            }
        }
    }
}
