//! Lexicon loading: embedded per-language word lists or a user file.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};
use undercover_core::{Language, Lexicon};

const LEXICON_IT: &str = include_str!("../assets/lexicon_it.json");
const LEXICON_EN: &str = include_str!("../assets/lexicon_en.json");

/// Raw JSON of the lexicon bundled for `language`.
pub fn embedded_json(language: Language) -> &'static str {
    match language {
        Language::Italian => LEXICON_IT,
        Language::English => LEXICON_EN,
    }
}

/// Loads the lexicon for `language`, or the file at `path` when given.
///
/// Duplicate words are logged; they do not stop the load.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a JSON object of string arrays.
#[instrument(skip(path), fields(path = ?path.map(Path::display)))]
pub fn load(language: Language, path: Option<&Path>) -> Result<Lexicon> {
    let lexicon = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read lexicon {}", path.display()))?;
            Lexicon::from_json_str(&json)
                .with_context(|| format!("Invalid lexicon {}", path.display()))?
        }
        None => Lexicon::from_json_str(embedded_json(language))
            .with_context(|| format!("Invalid embedded lexicon for {}", language))?,
    };

    for (category, words) in lexicon.duplicate_entries() {
        warn!(%category, ?words, "Category lists a word more than once");
    }
    info!(categories = lexicon.len(), "Lexicon loaded");
    Ok(lexicon)
}

/// Summary of a lexicon for the `lexicon` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconReport {
    /// Every category key.
    pub categories: usize,
    /// Categories with at least two words.
    pub playable: Vec<String>,
    /// Categories with a repeated word, and the repeated words.
    pub duplicates: Vec<(String, Vec<String>)>,
}

impl LexiconReport {
    /// Builds a report for `lexicon`.
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            categories: lexicon.len(),
            playable: lexicon
                .valid_categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            duplicates: lexicon
                .duplicate_entries()
                .into_iter()
                .map(|(category, words)| {
                    (
                        category.to_string(),
                        words.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Whether a round can be dealt from the lexicon.
    pub fn is_playable(&self) -> bool {
        !self.playable.is_empty()
    }
}

impl std::fmt::Display for LexiconReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} categories, {} playable",
            self.categories,
            self.playable.len()
        )?;
        for category in &self.playable {
            writeln!(f, "  {}", category)?;
        }
        for (category, words) in &self.duplicates {
            writeln!(f, "  warning: {} repeats {}", category, words.join(", "))?;
        }
        Ok(())
    }
}
