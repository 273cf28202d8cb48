//! Word lexicons and word-pair selection.
//!
//! A lexicon maps a category key to a list of related words (a synset).
//! A round draws its two words from one category.

use crate::error::GameError;
use crate::rng::RandomSource;
use crate::role::Role;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument, warn};

/// The two words of a round and the category they came from.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct WordPair {
    /// Category both words were drawn from.
    category: String,
    /// Word shown to majority players.
    majority: String,
    /// Word shown to minority players.
    minority: String,
}

impl WordPair {
    /// Creates a word pair.
    pub fn new(
        category: impl Into<String>,
        majority: impl Into<String>,
        minority: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            majority: majority.into(),
            minority: minority.into(),
        }
    }

    /// Returns the word a player with `role` is shown.
    pub fn word_for(&self, role: Role) -> &str {
        match role {
            Role::Majority => &self.majority,
            Role::Minority => &self.minority,
        }
    }
}

/// Supplies the word pair for a new round.
pub trait WordSource {
    /// Picks a majority/minority word pair.
    ///
    /// # Errors
    ///
    /// [`GameError::NoValidCategory`] if no pair can be drawn.
    fn pick_pair(&self, rng: &mut dyn RandomSource) -> Result<WordPair, GameError>;
}

/// Category → words mapping, as stored in a lexicon JSON resource.
///
/// Categories are kept in key order so a seeded [`RandomSource`] always
/// picks the same category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    categories: BTreeMap<String, Vec<String>>,
}

impl Lexicon {
    /// Creates a lexicon from categories.
    pub fn new<K: Into<String>>(categories: impl IntoIterator<Item = (K, Vec<String>)>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|(key, words)| (key.into(), words))
                .collect(),
        }
    }

    /// Parses a lexicon from a JSON object of string arrays.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidLexicon`] if the text is not such an object.
    #[instrument(skip(json), fields(len = json.len()))]
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let lexicon: Self = serde_json::from_str(json).map_err(|e| GameError::InvalidLexicon {
            reason: e.to_string(),
        })?;
        debug!(categories = lexicon.len(), "Lexicon parsed");
        Ok(lexicon)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Words of a category.
    pub fn category(&self, key: &str) -> Option<&[String]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// Keys of the categories a pair can be drawn from (two or more words).
    pub fn valid_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, words)| words.len() >= 2)
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Categories that list the same word more than once, with the repeated words.
    ///
    /// Such a category can produce a round where both words are identical.
    pub fn duplicate_entries(&self) -> Vec<(&str, Vec<&str>)> {
        self.categories
            .iter()
            .filter_map(|(key, words)| {
                let mut seen = BTreeSet::new();
                let repeated: BTreeSet<&str> = words
                    .iter()
                    .map(String::as_str)
                    .filter(|word| !seen.insert(*word))
                    .collect();
                if repeated.is_empty() {
                    None
                } else {
                    Some((key.as_str(), repeated.into_iter().collect()))
                }
            })
            .collect()
    }
}

impl WordSource for Lexicon {
    #[instrument(skip(self, rng), fields(categories = self.len()))]
    fn pick_pair(&self, rng: &mut dyn RandomSource) -> Result<WordPair, GameError> {
        let valid: Vec<(&String, &Vec<String>)> = self
            .categories
            .iter()
            .filter(|(_, words)| words.len() >= 2)
            .collect();

        if valid.is_empty() {
            warn!("Lexicon has no category with at least two words");
            return Err(GameError::NoValidCategory);
        }

        let (category, words) = valid[rng.below(valid.len())];

        // second index drawn from the remaining len - 1 slots, so it never equals the first
        let first = rng.below(words.len());
        let mut second = rng.below(words.len() - 1);
        if second >= first {
            second += 1;
        }

        let minority = &words[first];
        let majority = &words[second];
        if minority == majority {
            warn!(
                %category,
                word = %minority,
                "Category repeats a word; both player groups get the same word"
            );
        }

        debug!(%category, first, second, "Word pair picked");
        Ok(WordPair::new(category.as_str(), majority.as_str(), minority.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ScriptedRng};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_json() {
        let lexicon =
            Lexicon::from_json_str(r#"{"animals": ["cat", "dog"], "fruit": ["apple"]}"#).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.category("fruit"), Some(&["apple".to_string()][..]));
        assert_eq!(lexicon.valid_categories(), vec!["animals"]);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            Lexicon::from_json_str(r#"["cat", "dog"]"#),
            Err(GameError::InvalidLexicon { .. })
        ));
    }

    #[test]
    fn test_no_valid_category() {
        let lexicon = Lexicon::new([("a", words(&["one"])), ("b", Vec::new())]);
        let mut rng = GameRng::new(3);
        assert_eq!(lexicon.pick_pair(&mut rng), Err(GameError::NoValidCategory));

        let empty = Lexicon::default();
        assert_eq!(empty.pick_pair(&mut rng), Err(GameError::NoValidCategory));
    }

    #[test]
    fn test_pair_is_distinct_and_from_one_category() {
        let lexicon = Lexicon::new([
            ("animals", words(&["cat", "dog", "mouse"])),
            ("drinks", words(&["tea", "coffee"])),
            ("single", words(&["alone"])),
        ]);
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            let pair = lexicon.pick_pair(&mut rng).unwrap();
            let category = lexicon.category(pair.category()).unwrap();
            assert!(category.contains(pair.majority()));
            assert!(category.contains(pair.minority()));
            assert_ne!(pair.majority(), pair.minority());
            assert_ne!(pair.category(), "single");
        }
    }

    #[test]
    fn test_second_index_skips_the_first() {
        let lexicon = Lexicon::new([("animals", words(&["cat", "dog", "mouse"]))]);
        // category 0, first 1, second slot 1 shifts past the first to 2
        let mut rng = ScriptedRng::new([0, 1, 1]);
        let pair = lexicon.pick_pair(&mut rng).unwrap();
        assert_eq!(pair.minority(), "dog");
        assert_eq!(pair.majority(), "mouse");

        // second slot 0 lies below the first and is kept
        let mut rng = ScriptedRng::new([0, 1, 0]);
        let pair = lexicon.pick_pair(&mut rng).unwrap();
        assert_eq!(pair.minority(), "dog");
        assert_eq!(pair.majority(), "cat");
    }

    #[test]
    fn test_constant_source_still_picks_two_words() {
        let lexicon = Lexicon::new([("animals", words(&["cat", "dog", "mouse"]))]);

        let pair = lexicon.pick_pair(&mut ScriptedRng::default()).unwrap();
        assert_eq!(pair.minority(), "cat");
        assert_eq!(pair.majority(), "dog");

        // every value congruent mod 3 and mod 2
        let pair = lexicon.pick_pair(&mut ScriptedRng::new([6])).unwrap();
        assert_ne!(pair.minority(), pair.majority());
    }

    #[test]
    fn test_duplicate_strings_are_distinct_by_index() {
        let lexicon = Lexicon::new([("echo", words(&["same", "same"]))]);
        let mut rng = GameRng::new(5);
        let pair = lexicon.pick_pair(&mut rng).unwrap();
        assert_eq!(pair.majority(), "same");
        assert_eq!(pair.minority(), "same");
    }

    #[test]
    fn test_duplicate_entries_reported() {
        let lexicon = Lexicon::new([
            ("clean", words(&["a", "b"])),
            ("dirty", words(&["x", "y", "x", "x"])),
        ]);
        assert_eq!(lexicon.duplicate_entries(), vec![("dirty", vec!["x"])]);
    }

    #[test]
    fn test_word_for_role() {
        let pair = WordPair::new("animals", "cat", "dog");
        assert_eq!(pair.word_for(Role::Majority), "cat");
        assert_eq!(pair.word_for(Role::Minority), "dog");
    }
}
