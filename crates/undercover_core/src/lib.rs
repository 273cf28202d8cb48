//! Undercover core - game logic for a same-device social deduction word game.
//!
//! Most players share a common word while a few (the *minority*, or
//! undercover players) receive a related but different one. Players view
//! their word one at a time on a shared device, then vote on who they think
//! got the different word.
//!
//! # Architecture
//!
//! - **Randomness**: [`RandomSource`] is injected everywhere randomness is
//!   needed. [`GameRng`] for play, [`ScriptedRng`] for exact tests.
//! - **Roles**: [`assign_roles`] shuffles the role multiset.
//! - **Words**: [`Lexicon`] implements [`WordSource`] and draws a [`WordPair`].
//! - **Rounds**: typestate phases ([`RoundSetup`], [`RoundRevealing`],
//!   [`RoundVoting`], [`RoundConcluded`]) with [`AnyRound`] as the runtime
//!   wrapper.
//! - **Session**: [`GameSession`] is the boundary a front end talks to.
//!
//! # Example
//!
//! ```
//! use undercover_core::{GameConfig, GameRng, GameSession, Language, Lexicon, Phase};
//!
//! # fn example() -> Result<(), undercover_core::GameError> {
//! let lexicon = Lexicon::from_json_str(r#"{"animals": ["cat", "dog", "mouse"]}"#)?;
//! let config = GameConfig::new(4, 1, Vec::new(), Language::English)?;
//! let mut session = GameSession::new(config, lexicon, GameRng::new(7));
//!
//! session.start_round()?;
//! for _ in 0..4 {
//!     session.toggle_reveal()?;
//!     session.advance_turn()?;
//! }
//! assert_eq!(session.phase(), Phase::Voting);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod contracts;
mod error;
mod invariants;
mod language;
mod lexicon;
mod phases;
mod player;
mod rng;
mod role;
mod session;
mod typestate;
mod vote;
mod wrapper;

// Crate-level exports - Configuration
pub use config::{GameConfig, MAX_PLAYERS, MIN_MINORITY, MIN_PLAYERS, max_minority};

// Crate-level exports - Contracts and invariants
pub use contracts::{Contract, EligibleTarget, StartContract, TurnContract, VoteContract};
pub use invariants::{
    EligibilityConsistentInvariant, Invariant, InvariantSet, InvariantViolation,
    MinorityCountInvariant, RolesAlignedInvariant, RoundInvariants, TurnBoundsInvariant,
};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Domain types
pub use language::{Language, UnknownLanguage};
pub use lexicon::{Lexicon, WordPair, WordSource};
pub use phases::{Outcome, Phase};
pub use player::Player;
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use role::{Role, assign_roles};
pub use vote::{Vote, VoteOutcome};

// Crate-level exports - Round state machine
pub use session::GameSession;
pub use typestate::{
    RoundConcluded, RoundRevealing, RoundSetup, RoundState, RoundVoting, TurnResult, VoteResult,
};
pub use wrapper::AnyRound;
