//! Undercover - terminal front end for the undercover word game.
//!
//! Wires [`undercover_core`] to a line-oriented terminal, a persisted
//! language preference and the bundled lexicons.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod lexicons;
pub mod settings;
pub mod terminal;

pub use cli::{Cli, Command};
pub use lexicons::LexiconReport;
pub use settings::{Settings, SettingsError, SettingsStore};
pub use terminal::{LanguagePreference, Terminal};
