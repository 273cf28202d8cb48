//! Supported game languages.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language of the lexicon and the default player labels.
///
/// Serialized as its two-letter code. Defaults to Italian.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Language {
    /// Italian (`"it"`).
    #[default]
    #[serde(rename = "it")]
    Italian,
    /// English (`"en"`).
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Italian => "it",
            Self::English => "en",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::Italian => "Italiano",
            Self::English => "English",
        }
    }

    /// Label used to build default player names.
    pub fn player_label(self) -> &'static str {
        match self {
            Self::Italian => "Giocatore",
            Self::English => "Player",
        }
    }

    /// Default name for the player at `index` (0-based), e.g. "Player 1".
    pub fn default_player_name(self, index: usize) -> String {
        format!("{} {}", self.player_label(), index + 1)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Unrecognized language code.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Unsupported language code: {:?}", code)]
pub struct UnknownLanguage {
    /// The code that was rejected.
    pub code: String,
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" => Ok(Self::Italian),
            "en" => Ok(Self::English),
            other => Err(UnknownLanguage {
                code: other.to_string(),
            }),
        }
    }
}
