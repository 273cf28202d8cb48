//! The session a front end drives: one configuration, one round at a time.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::language::Language;
use crate::lexicon::{Lexicon, WordPair, WordSource};
use crate::phases::{Outcome, Phase};
use crate::player::Player;
use crate::rng::{GameRng, RandomSource};
use crate::role::Role;
use crate::typestate::{RoundSetup, RoundState, VoteResult};
use crate::vote::{Vote, VoteOutcome};
use crate::wrapper::AnyRound;
use tracing::{info, instrument, warn};

/// A game session.
///
/// Owns the word source, the random source and the current round. Every
/// operation either succeeds and moves the round forward, or fails and
/// leaves the round exactly as it was.
#[derive(Debug)]
pub struct GameSession<W = Lexicon, R = GameRng> {
    round: AnyRound,
    words: W,
    rng: R,
}

impl<W: WordSource, R: RandomSource> GameSession<W, R> {
    /// Creates a session in the Configuring phase.
    #[instrument(skip_all)]
    pub fn new(config: GameConfig, words: W, rng: R) -> Self {
        Self {
            round: AnyRound::Setup(RoundSetup::new(config)),
            words,
            rng,
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Configuration
    // ─────────────────────────────────────────────────────────

    /// Replaces the configuration, keeping the language.
    ///
    /// # Errors
    ///
    /// - [`GameError::WrongPhase`] outside Configuring.
    /// - [`GameError::InvalidConfiguration`] if the values are out of bounds.
    #[instrument(skip(self, names))]
    pub fn configure(
        &mut self,
        player_count: usize,
        minority_count: usize,
        names: Vec<String>,
    ) -> Result<(), GameError> {
        let language = *self.config().language();
        let config = GameConfig::new(player_count, minority_count, names, language)?;
        *self.setup_config()? = config;
        Ok(())
    }

    /// Adds a player. Returns whether the count changed.
    ///
    /// # Errors
    ///
    /// [`GameError::WrongPhase`] outside Configuring.
    pub fn increment_players(&mut self) -> Result<bool, GameError> {
        Ok(self.setup_config()?.increment_players())
    }

    /// Removes the last player. Returns whether the count changed.
    ///
    /// # Errors
    ///
    /// [`GameError::WrongPhase`] outside Configuring.
    pub fn decrement_players(&mut self) -> Result<bool, GameError> {
        Ok(self.setup_config()?.decrement_players())
    }

    /// Adds a minority player. Returns whether the count changed.
    ///
    /// # Errors
    ///
    /// [`GameError::WrongPhase`] outside Configuring.
    pub fn increment_minority(&mut self) -> Result<bool, GameError> {
        Ok(self.setup_config()?.increment_minority())
    }

    /// Removes a minority player. Returns whether the count changed.
    ///
    /// # Errors
    ///
    /// [`GameError::WrongPhase`] outside Configuring.
    pub fn decrement_minority(&mut self) -> Result<bool, GameError> {
        Ok(self.setup_config()?.decrement_minority())
    }

    /// Renames a player. A blank name restores the default label.
    ///
    /// # Errors
    ///
    /// - [`GameError::WrongPhase`] outside Configuring.
    /// - [`GameError::InvalidConfiguration`] if `index` is not a seat.
    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), GameError> {
        self.setup_config()?.set_name(index, name)
    }

    /// Switches the language and the word source that goes with it.
    ///
    /// The current round, if any, is abandoned.
    #[instrument(skip(self, words))]
    pub fn set_language(&mut self, language: Language, words: W) {
        self.reset_round();
        if let AnyRound::Setup(setup) = &mut self.round {
            setup.config_mut().set_language(language);
        }
        self.words = words;
        info!(%language, "Language changed");
    }

    fn setup_config(&mut self) -> Result<&mut GameConfig, GameError> {
        match &mut self.round {
            AnyRound::Setup(setup) => Ok(setup.config_mut()),
            other => Err(GameError::WrongPhase {
                expected: Phase::Configuring,
                actual: other.phase(),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────

    /// Deals a new round: roles, words, and the first turn.
    ///
    /// Accepted in Configuring, and in Concluded as a shortcut for
    /// [`reset_round`](Self::reset_round) followed by a start.
    ///
    /// # Errors
    ///
    /// - [`GameError::WrongPhase`] while a round is in progress.
    /// - [`GameError::InvalidConfiguration`] or [`GameError::NoValidCategory`]
    ///   from dealing; the session stays where it was.
    #[instrument(skip(self))]
    pub fn start_round(&mut self) -> Result<(), GameError> {
        let setup = match &self.round {
            AnyRound::Setup(setup) => setup.clone(),
            AnyRound::Concluded(round) => RoundSetup::new(round.config().clone()),
            other => {
                return Err(GameError::WrongPhase {
                    expected: Phase::Configuring,
                    actual: other.phase(),
                });
            }
        };

        let revealing = setup.start(&self.words, &mut self.rng)?;
        self.round = revealing.into();
        Ok(())
    }

    /// Flips the current player's card. Returns whether the word now shows.
    ///
    /// # Errors
    ///
    /// [`GameError::WrongPhase`] outside Revealing.
    pub fn toggle_reveal(&mut self) -> Result<bool, GameError> {
        match &mut self.round {
            AnyRound::Revealing(round) => Ok(round.toggle_reveal()),
            other => Err(GameError::WrongPhase {
                expected: Phase::Revealing,
                actual: other.phase(),
            }),
        }
    }

    /// Passes the device on. Returns the phase afterwards: Revealing, or
    /// Voting once every player has seen their word.
    ///
    /// # Errors
    ///
    /// [`GameError::WrongPhase`] outside Revealing.
    #[instrument(skip(self))]
    pub fn advance_turn(&mut self) -> Result<Phase, GameError> {
        let AnyRound::Revealing(round) = &self.round else {
            return Err(GameError::WrongPhase {
                expected: Phase::Revealing,
                actual: self.round.phase(),
            });
        };

        let next = round.clone().advance_turn()?;
        self.round = next.into();
        Ok(self.round.phase())
    }

    /// Votes on the player at `target` and reports what the vote revealed.
    ///
    /// # Errors
    ///
    /// - [`GameError::WrongPhase`] outside Voting.
    /// - [`GameError::InvalidVoteTarget`] if `target` is out of range or
    ///   was already voted on.
    #[instrument(skip(self))]
    pub fn cast_vote(&mut self, target: usize) -> Result<VoteOutcome, GameError> {
        let AnyRound::Voting(round) = &self.round else {
            return Err(GameError::WrongPhase {
                expected: Phase::Voting,
                actual: self.round.phase(),
            });
        };

        let result: VoteResult = round.clone().cast_vote(target)?;
        let outcome = result.outcome();
        self.round = result.into();
        Ok(outcome)
    }

    /// Drops the current round and returns to Configuring with the same
    /// configuration. Accepted in every phase.
    #[instrument(skip(self), fields(phase = %self.round.phase()))]
    pub fn reset_round(&mut self) {
        let round = std::mem::take(&mut self.round);
        self.round = match round {
            AnyRound::Setup(setup) => AnyRound::Setup(setup),
            AnyRound::Revealing(round) => {
                warn!("Abandoning a round before voting");
                round.restart().into()
            }
            AnyRound::Voting(round) => {
                warn!("Abandoning a round during voting");
                round.restart().into()
            }
            AnyRound::Concluded(round) => round.restart().into(),
        };
    }

    // ─────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    /// The current round in whatever phase it is.
    pub fn round(&self) -> &AnyRound {
        &self.round
    }

    /// The configuration the next (or current) round uses.
    pub fn config(&self) -> &GameConfig {
        self.round.config()
    }

    /// The word source.
    pub fn words(&self) -> &W {
        &self.words
    }

    /// The random source.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// State of the dealt round, if any.
    pub fn state(&self) -> Option<&RoundState> {
        self.round.state()
    }

    /// Roster: the dealt round's, or the one the configuration would deal.
    pub fn players(&self) -> Vec<Player> {
        match self.state() {
            Some(state) => state.players().clone(),
            None => self.config().players(),
        }
    }

    /// Roles by seat. Empty before a round is dealt.
    pub fn roles(&self) -> &[Role] {
        self.state().map(|s| s.roles().as_slice()).unwrap_or_default()
    }

    /// Word shown to the player at `index`.
    pub fn word_for(&self, index: usize) -> Option<&str> {
        self.state().and_then(|s| s.word_for(index))
    }

    /// The round's word pair.
    pub fn word_pair(&self) -> Option<&WordPair> {
        self.state().map(RoundState::words)
    }

    /// Seat whose turn it is to view their word.
    pub fn current_turn(&self) -> Option<usize> {
        self.state().map(|s| *s.current_turn())
    }

    /// Player whose turn it is, while revealing.
    pub fn current_player(&self) -> Option<&Player> {
        match &self.round {
            AnyRound::Revealing(round) => Some(round.current_player()),
            _ => None,
        }
    }

    /// The current player's word, only while their card is face up.
    pub fn visible_word(&self) -> Option<&str> {
        match &self.round {
            AnyRound::Revealing(round) if *round.state().revealed() => Some(round.current_word()),
            _ => None,
        }
    }

    /// Whether the current player's card is face up.
    pub fn is_revealed(&self) -> bool {
        self.state().is_some_and(|s| *s.revealed())
    }

    /// Whether every player has viewed their word.
    pub fn turns_complete(&self) -> bool {
        self.state().is_some_and(|s| *s.turns_complete())
    }

    /// Whether the player at `index` can still be voted on.
    pub fn is_eligible(&self, index: usize) -> bool {
        self.state().is_some_and(|s| s.is_eligible(index))
    }

    /// Seats that can still be voted on.
    pub fn eligible_players(&self) -> Vec<usize> {
        self.state()
            .map(RoundState::eligible_players)
            .unwrap_or_default()
    }

    /// Minority players not yet voted on.
    pub fn remaining_minority(&self) -> Option<usize> {
        self.state().map(|s| *s.remaining_minority())
    }

    /// Votes cast this round, in order.
    pub fn votes(&self) -> &[Vote] {
        self.state().map(|s| s.votes().as_slice()).unwrap_or_default()
    }

    /// How the round ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.round.outcome()
    }
}
