//! Phase-specific typestate structs for a round.
//!
//! Each phase is its own type. A `RoundConcluded` always has an outcome,
//! a `RoundVoting` can never advance turns, and so on.

use crate::config::GameConfig;
use crate::contracts::{Contract, StartContract, TurnContract, VoteContract};
use crate::error::GameError;
use crate::invariants::check_round;
use crate::lexicon::{WordPair, WordSource};
use crate::phases::Outcome;
use crate::player::Player;
use crate::rng::RandomSource;
use crate::role::{Role, assign_roles};
use crate::vote::{Vote, VoteOutcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Round State
// ─────────────────────────────────────────────────────────────

/// Everything a round tracks once it has started.
///
/// Roles, words and eligibility are aligned with `players` by index.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RoundState {
    /// Roster in seat order.
    pub(crate) players: Vec<Player>,
    /// Secret role of each player.
    pub(crate) roles: Vec<Role>,
    /// The round's two words.
    pub(crate) words: WordPair,
    /// Number of minority players dealt.
    pub(crate) minority_count: usize,
    /// Seat whose turn it is to view their word.
    pub(crate) current_turn: usize,
    /// Whether the current player's word is showing.
    pub(crate) revealed: bool,
    /// Whether every player has viewed their word.
    pub(crate) turns_complete: bool,
    /// Whether each player can still be voted on.
    pub(crate) eligible: Vec<bool>,
    /// Minority players not yet voted on.
    pub(crate) remaining_minority: usize,
    /// Votes cast so far, in order.
    pub(crate) votes: Vec<Vote>,
}

impl RoundState {
    /// Number of players in the round.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Word shown to the player at `index`.
    pub fn word_for(&self, index: usize) -> Option<&str> {
        self.roles.get(index).map(|role| self.words.word_for(*role))
    }

    /// Role of the player at `index`.
    pub fn role_of(&self, index: usize) -> Option<Role> {
        self.roles.get(index).copied()
    }

    /// Whether the player at `index` can still be voted on.
    pub fn is_eligible(&self, index: usize) -> bool {
        self.eligible.get(index).copied().unwrap_or(false)
    }

    /// Seats that can still be voted on, in order.
    pub fn eligible_players(&self) -> Vec<usize> {
        self.eligible
            .iter()
            .enumerate()
            .filter(|(_, eligible)| **eligible)
            .map(|(index, _)| index)
            .collect()
    }

    /// Checks every round invariant.
    ///
    /// Rounds built by this crate always pass; deserialized ones may not.
    ///
    /// # Errors
    ///
    /// [`GameError::InvariantViolation`] naming every violated invariant.
    pub fn validate(&self) -> Result<(), GameError> {
        check_round(self).map_err(GameError::InvariantViolation)
    }

    /// Majority players that can still be voted on.
    pub fn eligible_majority(&self) -> usize {
        self.roles
            .iter()
            .zip(&self.eligible)
            .filter(|(role, eligible)| **eligible && !role.is_minority())
            .count()
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// No round in progress; the configuration can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSetup {
    config: GameConfig,
}

impl RoundSetup {
    /// Creates the setup phase for `config`.
    #[instrument(skip_all)]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the configuration for editing.
    pub fn config_mut(&mut self) -> &mut GameConfig {
        &mut self.config
    }

    /// Deals roles and words and hands the device to the first player.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidConfiguration`] if the configuration is out of bounds.
    /// - [`GameError::NoValidCategory`] if `words` cannot supply a pair.
    #[instrument(skip_all, fields(
        players = self.config.player_count(),
        minority = self.config.minority_count()
    ))]
    pub fn start<W, R>(&self, words: &W, rng: &mut R) -> Result<RoundRevealing, GameError>
    where
        W: WordSource + ?Sized,
        R: RandomSource,
    {
        StartContract::pre(&self.config)?;

        let player_count = *self.config.player_count();
        let minority_count = *self.config.minority_count();

        let roles = assign_roles(minority_count, player_count, rng)?;
        let words = words.pick_pair(rng)?;

        let state = RoundState {
            players: self.config.players(),
            roles,
            words,
            minority_count,
            current_turn: 0,
            revealed: false,
            turns_complete: false,
            eligible: vec![true; player_count],
            remaining_minority: minority_count,
            votes: Vec::new(),
        };

        #[cfg(debug_assertions)]
        StartContract::post(&self.config, &state)?;

        info!(category = %state.words.category(), "Round started");
        Ok(RoundRevealing {
            config: self.config.clone(),
            state,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Revealing Phase
// ─────────────────────────────────────────────────────────────

/// Players view their words one at a time, in seat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRevealing {
    pub(crate) config: GameConfig,
    pub(crate) state: RoundState,
}

impl RoundRevealing {
    /// Returns the round state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Returns the configuration the round was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.state.players[self.state.current_turn]
    }

    /// Word of the player whose turn it is.
    pub fn current_word(&self) -> &str {
        self.state
            .words
            .word_for(self.state.roles[self.state.current_turn])
    }

    /// Flips the current player's card. Returns whether the word now shows.
    #[instrument(skip(self), fields(turn = self.state.current_turn))]
    pub fn toggle_reveal(&mut self) -> bool {
        self.state.revealed = !self.state.revealed;
        debug!(revealed = self.state.revealed, "Card flipped");
        self.state.revealed
    }

    /// Passes the device to the next player, or opens voting after the last one.
    ///
    /// The current player is assumed to have seen their word even if the card
    /// was never flipped.
    ///
    /// # Errors
    ///
    /// [`GameError::InvariantViolation`] if a postcondition fails (debug builds).
    #[instrument(skip(self), fields(turn = self.state.current_turn))]
    pub fn advance_turn(self) -> Result<TurnResult, GameError> {
        #[cfg(debug_assertions)]
        let before = self.state.clone();

        TurnContract::pre(&self.state, &())?;

        let mut round = self;
        if !round.state.revealed {
            debug!("Advancing without the card having been flipped");
        }
        round.state.revealed = false;

        if round.state.current_turn + 1 == round.state.player_count() {
            round.state.turns_complete = true;

            #[cfg(debug_assertions)]
            TurnContract::post(&before, &round.state)?;

            info!("All players have seen their word; voting opens");
            return Ok(TurnResult::Voting(RoundVoting {
                config: round.config,
                state: round.state,
            }));
        }

        round.state.current_turn += 1;

        #[cfg(debug_assertions)]
        TurnContract::post(&before, &round.state)?;

        Ok(TurnResult::Revealing(round))
    }

    /// Abandons the round (consumes revealing, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> RoundSetup {
        RoundSetup::new(self.config)
    }
}

// ─────────────────────────────────────────────────────────────
//  Voting Phase
// ─────────────────────────────────────────────────────────────

/// Players vote on who holds the different word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundVoting {
    pub(crate) config: GameConfig,
    pub(crate) state: RoundState,
}

impl RoundVoting {
    /// Returns the round state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Returns the configuration the round was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Votes on the player at `target`, revealing their role and removing
    /// them from the pool for the rest of the round.
    ///
    /// The round concludes when the last minority player is caught, or when
    /// no majority player is left to vote on.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidVoteTarget`] if `target` is out of range or was
    ///   already voted on.
    /// - [`GameError::InvariantViolation`] if the state is inconsistent, or a
    ///   postcondition fails (debug builds).
    #[instrument(skip(self), fields(remaining = self.state.remaining_minority))]
    pub fn cast_vote(self, target: usize) -> Result<VoteResult, GameError> {
        #[cfg(debug_assertions)]
        let before = self.state.clone();

        VoteContract::pre(&self.state, &target)?;

        let mut round = self;
        let role = round
            .state
            .role_of(target)
            .ok_or(GameError::InvalidVoteTarget { index: target })?;
        if role.is_minority() {
            round.state.remaining_minority =
                round.state.remaining_minority.checked_sub(1).ok_or_else(|| {
                    GameError::InvariantViolation(
                        "minority player voted on with no minority remaining".to_string(),
                    )
                })?;
        }
        round.state.eligible[target] = false;
        round.state.votes.push(Vote { target, role });

        #[cfg(debug_assertions)]
        VoteContract::post(&before, &round.state)?;

        let outcome = VoteOutcome {
            target,
            was_minority: role.is_minority(),
            remaining_minority: round.state.remaining_minority,
        };
        info!(%role, remaining = outcome.remaining_minority, "Vote resolved");

        let conclusion = if round.state.remaining_minority == 0 {
            Some(Outcome::MinorityCaught)
        } else if round.state.eligible_majority() == 0 {
            Some(Outcome::MinorityWins {
                survivors: round.state.remaining_minority,
            })
        } else {
            None
        };

        match conclusion {
            Some(ending) => {
                info!(%ending, "Round concluded");
                Ok(VoteResult::Concluded(
                    RoundConcluded {
                        config: round.config,
                        state: round.state,
                        outcome: ending,
                    },
                    outcome,
                ))
            }
            None => Ok(VoteResult::Voting(round, outcome)),
        }
    }

    /// Abandons the round (consumes voting, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> RoundSetup {
        RoundSetup::new(self.config)
    }
}

// ─────────────────────────────────────────────────────────────
//  Concluded Phase
// ─────────────────────────────────────────────────────────────

/// Round over; the outcome is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConcluded {
    config: GameConfig,
    state: RoundState,
    outcome: Outcome,
}

impl RoundConcluded {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the final round state.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Returns the configuration the round was played with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns to setup with the same configuration (consumes concluded).
    #[instrument(skip(self))]
    pub fn restart(self) -> RoundSetup {
        RoundSetup::new(self.config)
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Results
// ─────────────────────────────────────────────────────────────

/// Result of advancing a turn.
#[derive(Debug)]
pub enum TurnResult {
    /// Another player still has to see their word.
    Revealing(RoundRevealing),
    /// Everyone has seen their word.
    Voting(RoundVoting),
}

/// Result of casting a vote, with what the vote revealed.
#[derive(Debug)]
pub enum VoteResult {
    /// Voting continues.
    Voting(RoundVoting, VoteOutcome),
    /// The round is over.
    Concluded(RoundConcluded, VoteOutcome),
}

impl VoteResult {
    /// What the vote revealed.
    pub fn outcome(&self) -> VoteOutcome {
        match self {
            VoteResult::Voting(_, outcome) | VoteResult::Concluded(_, outcome) => *outcome,
        }
    }
}
