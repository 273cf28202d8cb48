//! Round configuration: player count, minority count and names.

use crate::error::GameError;
use crate::language::Language;
use crate::player::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Fewest players a round can have.
pub const MIN_PLAYERS: usize = 3;

/// Most players a round can have.
pub const MAX_PLAYERS: usize = 25;

/// Fewest minority players a round can have.
pub const MIN_MINORITY: usize = 1;

/// Most minority players allowed for `player_count` players:
/// `ceil((player_count + 1) / 2) - 1`.
pub fn max_minority(player_count: usize) -> usize {
    (player_count + 1).div_ceil(2) - 1
}

/// Validated configuration of the next round.
///
/// `names` always has exactly `player_count` entries; a blank entry means
/// "use the default label" and is resolved by [`GameConfig::players`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players.
    player_count: usize,
    /// Number of players holding the minority word.
    minority_count: usize,
    /// Player names by seat; blank means default.
    names: Vec<String>,
    /// Language for default player labels.
    language: Language,
}

impl GameConfig {
    /// Creates a configuration, checking every bound.
    ///
    /// Missing names are left blank (defaults); more names than players is an error.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] if a count is out of bounds or
    /// there are too many names.
    #[instrument(skip(names), fields(names = names.len()))]
    pub fn new(
        player_count: usize,
        minority_count: usize,
        names: Vec<String>,
        language: Language,
    ) -> Result<Self, GameError> {
        check_bounds(player_count, minority_count)?;
        if names.len() > player_count {
            warn!("More names than players");
            return Err(GameError::invalid_configuration(format!(
                "{} names for {} players",
                names.len(),
                player_count
            )));
        }

        let mut names = names;
        names.resize(player_count, String::new());

        debug!("Configuration accepted");
        Ok(Self {
            player_count,
            minority_count,
            names,
            language,
        })
    }

    /// Checks the bounds again.
    ///
    /// Configurations built through this module always pass; deserialized
    /// ones may not.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] on any violated bound.
    pub fn validate(&self) -> Result<(), GameError> {
        check_bounds(self.player_count, self.minority_count)?;
        if self.names.len() != self.player_count {
            return Err(GameError::invalid_configuration(format!(
                "{} names for {} players",
                self.names.len(),
                self.player_count
            )));
        }
        Ok(())
    }

    /// Builds the roster, replacing blank names with the default label.
    pub fn players(&self) -> Vec<Player> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.trim();
                let name = if name.is_empty() {
                    self.language.default_player_name(index)
                } else {
                    name.to_string()
                };
                Player::new(index, name)
            })
            .collect()
    }

    /// Adds a player, up to [`MAX_PLAYERS`]. Returns whether the count changed.
    #[instrument(skip(self), fields(player_count = self.player_count))]
    pub fn increment_players(&mut self) -> bool {
        if self.player_count >= MAX_PLAYERS {
            return false;
        }
        self.player_count += 1;
        self.names.push(String::new());
        true
    }

    /// Removes the last player, down to [`MIN_PLAYERS`].
    ///
    /// The minority count is lowered if it no longer fits. Returns whether
    /// the player count changed.
    #[instrument(skip(self), fields(player_count = self.player_count))]
    pub fn decrement_players(&mut self) -> bool {
        if self.player_count <= MIN_PLAYERS {
            return false;
        }
        self.player_count -= 1;
        self.names.truncate(self.player_count);
        let cap = max_minority(self.player_count);
        if self.minority_count > cap {
            debug!(from = self.minority_count, to = cap, "Lowering minority count");
            self.minority_count = cap;
        }
        true
    }

    /// Adds a minority player, up to [`max_minority`]. Returns whether the count changed.
    #[instrument(skip(self), fields(minority_count = self.minority_count))]
    pub fn increment_minority(&mut self) -> bool {
        if self.minority_count >= max_minority(self.player_count) {
            return false;
        }
        self.minority_count += 1;
        true
    }

    /// Removes a minority player, down to [`MIN_MINORITY`]. Returns whether the count changed.
    #[instrument(skip(self), fields(minority_count = self.minority_count))]
    pub fn decrement_minority(&mut self) -> bool {
        if self.minority_count <= MIN_MINORITY {
            return false;
        }
        self.minority_count -= 1;
        true
    }

    /// Renames the player at `index`. A blank name restores the default.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfiguration`] if `index` is not a seat.
    #[instrument(skip(self, name))]
    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), GameError> {
        let slot = self.names.get_mut(index).ok_or_else(|| {
            GameError::invalid_configuration(format!("no player at seat {}", index + 1))
        })?;
        *slot = name.into();
        Ok(())
    }

    /// Changes the language used for default names.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}

impl Default for GameConfig {
    /// Four players, one minority, default names.
    fn default() -> Self {
        Self {
            player_count: 4,
            minority_count: 1,
            names: vec![String::new(); 4],
            language: Language::default(),
        }
    }
}

fn check_bounds(player_count: usize, minority_count: usize) -> Result<(), GameError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        warn!(player_count, "Player count out of bounds");
        return Err(GameError::invalid_configuration(format!(
            "{} players is outside {}..={}",
            player_count, MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    let cap = max_minority(player_count);
    if !(MIN_MINORITY..=cap).contains(&minority_count) {
        warn!(minority_count, cap, "Minority count out of bounds");
        return Err(GameError::invalid_configuration(format!(
            "{} minority players is outside {}..={} for {} players",
            minority_count, MIN_MINORITY, cap, player_count
        )));
    }
    Ok(())
}
