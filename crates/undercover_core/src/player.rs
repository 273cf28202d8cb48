//! Players in a round.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A player: seat index plus display name.
///
/// Identity is positional. The same index in the next round is the same seat,
/// nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Player {
    /// 0-based seat index (also the turn order).
    index: usize,
    /// Display name, never blank.
    name: String,
}

impl Player {
    /// Creates a player. The caller guarantees `name` is not blank.
    pub(crate) fn new(index: usize, name: String) -> Self {
        Self { index, name }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
