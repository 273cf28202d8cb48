//! Undercover - command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use undercover::{
    Cli, Command, LanguagePreference, LexiconReport, SettingsStore, Terminal, lexicons,
};
use undercover_core::{GameConfig, GameRng, GameSession, Language};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with the game on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = match &cli.settings {
        Some(path) => SettingsStore::open(path),
        None => SettingsStore::open_default(),
    }
    .context("Failed to open settings")?;

    match cli.command {
        Command::Play {
            players,
            minority,
            names,
            lang,
            lexicon,
            seed,
        } => run_play(store, players, minority, names, lang, lexicon, seed),
        Command::Language { code } => run_language(&store, code),
        Command::Lexicon {
            lang,
            lexicon,
            json,
        } => run_lexicon(&store, lang, lexicon.as_deref(), json),
    }
}

/// Plays rounds on stdin/stdout. Language commands in setup are saved to `store`.
#[instrument(skip(store, names, lexicon))]
fn run_play(
    store: SettingsStore,
    players: usize,
    minority: usize,
    names: Vec<String>,
    lang: Option<Language>,
    lexicon: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let language = lang.unwrap_or_else(|| store.language());
    let words = lexicons::load(language, lexicon.as_deref())?;
    let config = GameConfig::new(players, minority, names, language)
        .context("Invalid game configuration")?;
    let rng = match seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!(seed = rng.seed(), %language, "Starting session");

    let mut session = GameSession::new(config, words, rng);
    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout())
        .with_language_preference(LanguagePreference::new(store, lexicon));
    terminal.run(&mut session)
}

/// Shows the saved language, or saves a new one.
#[instrument(skip(store))]
fn run_language(store: &SettingsStore, code: Option<Language>) -> Result<()> {
    let mut updates = store.subscribe();
    if let Some(language) = code {
        store
            .set_language(language)
            .with_context(|| format!("Failed to save {}", store.path().display()))?;
    }

    let current = *updates.borrow_and_update();
    for language in Language::iter() {
        let marker = if language == current { "*" } else { " " };
        println!("{} {}  {}", marker, language.code(), language.native_name());
    }
    Ok(())
}

/// Validates a lexicon and prints its report.
#[instrument(skip(store))]
fn run_lexicon(
    store: &SettingsStore,
    lang: Option<Language>,
    lexicon: Option<&Path>,
    json: bool,
) -> Result<()> {
    let language = lang.unwrap_or_else(|| store.language());
    let words = lexicons::load(language, lexicon)?;
    let report = LexiconReport::new(&words);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to encode report")?
        );
    } else {
        print!("{}", report);
    }

    anyhow::ensure!(report.is_playable(), "Lexicon has no category with at least two words");
    Ok(())
}
