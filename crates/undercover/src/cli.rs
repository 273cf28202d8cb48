//! Command-line interface for undercover.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use undercover_core::Language;

/// Undercover - pass-the-device social deduction word game
#[derive(Parser, Debug)]
#[command(name = "undercover")]
#[command(about = "Pass-the-device word game: find who got the different word", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds on this terminal
    Play {
        /// Number of players (3-25)
        #[arg(short, long, default_value = "4")]
        players: usize,

        /// Number of undercover players
        #[arg(short, long, default_value = "1")]
        minority: usize,

        /// Player name, in seat order (repeatable)
        #[arg(short, long = "name")]
        names: Vec<String>,

        /// Language for this session (defaults to the saved preference)
        #[arg(short, long, value_parser = parse_language)]
        lang: Option<Language>,

        /// Lexicon JSON file to use instead of the bundled one
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Seed for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or save the preferred language
    Language {
        /// Language code to save (it, en)
        #[arg(value_parser = parse_language)]
        code: Option<Language>,
    },

    /// Check a lexicon and list its playable categories
    Lexicon {
        /// Bundled lexicon to check (defaults to the saved preference)
        #[arg(short, long, value_parser = parse_language)]
        lang: Option<Language>,

        /// Lexicon JSON file to check instead
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_language(code: &str) -> Result<Language, String> {
    code.parse::<Language>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_arguments() {
        let cli = Cli::parse_from([
            "undercover", "play", "-p", "5", "-m", "2", "--name", "Ada", "--name", "Bo", "--lang",
            "en", "--seed", "9",
        ]);
        match cli.command {
            Command::Play {
                players,
                minority,
                names,
                lang,
                lexicon,
                seed,
            } => {
                assert_eq!(players, 5);
                assert_eq!(minority, 2);
                assert_eq!(names, vec!["Ada", "Bo"]);
                assert_eq!(lang, Some(Language::English));
                assert_eq!(lexicon, None);
                assert_eq!(seed, Some(9));
            }
            other => panic!("Expected play, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_language_rejected() {
        assert!(Cli::try_parse_from(["undercover", "language", "fr"]).is_err());
    }

    #[test]
    fn test_global_settings_flag() {
        let cli = Cli::parse_from(["undercover", "language", "--settings", "/tmp/s.toml"]);
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.toml")));
    }
}
