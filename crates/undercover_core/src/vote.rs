//! Votes and their reported outcome.

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// A vote cast against a player, kept in the round's vote history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vote {
    /// Seat index of the player voted on.
    pub target: usize,
    /// Role the player turned out to hold.
    pub role: Role,
}

/// What a vote revealed, as reported back to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteOutcome {
    /// Seat index of the player voted on.
    pub target: usize,
    /// Whether the player held the minority word.
    pub was_minority: bool,
    /// Minority players still not voted on.
    pub remaining_minority: usize,
}

impl std::fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.was_minority {
            write!(
                f,
                "Player {} was undercover ({} left)",
                self.target + 1,
                self.remaining_minority
            )
        } else {
            write!(f, "Player {} was not undercover", self.target + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_names_the_seat_as_players_see_it() {
        let caught = VoteOutcome {
            target: 0,
            was_minority: true,
            remaining_minority: 1,
        };
        assert_eq!(caught.to_string(), "Player 1 was undercover (1 left)");

        let missed = VoteOutcome {
            target: 3,
            was_minority: false,
            remaining_minority: 1,
        };
        assert_eq!(missed.to_string(), "Player 4 was not undercover");
    }
}
