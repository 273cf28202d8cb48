//! Line-oriented terminal front end.
//!
//! Reads commands line by line and drives a [`GameSession`]. Rejected
//! commands print the error and prompt again; the session is unchanged.

use crate::lexicons;
use crate::settings::SettingsStore;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};
use undercover_core::{GameSession, Language, Lexicon, Outcome, Phase, RandomSource, Role};

/// Blank lines printed after a word is hidden, so it scrolls off screen.
const SCROLL_AWAY: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SetupCommand {
    Start,
    Quit,
    AddPlayer,
    RemovePlayer,
    AddMinority,
    RemoveMinority,
    Rename(usize, String),
    Language(Language),
}

#[derive(Debug, PartialEq, Eq)]
struct UnknownCommand;

impl FromStr for SetupCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "s" | "start" => Ok(SetupCommand::Start),
            "q" | "quit" => Ok(SetupCommand::Quit),
            "+p" => Ok(SetupCommand::AddPlayer),
            "-p" => Ok(SetupCommand::RemovePlayer),
            "+m" => Ok(SetupCommand::AddMinority),
            "-m" => Ok(SetupCommand::RemoveMinority),
            other => {
                if let Some(code) = other.strip_prefix("l ") {
                    let language = code.parse().map_err(|_| UnknownCommand)?;
                    return Ok(SetupCommand::Language(language));
                }
                let rest = other.strip_prefix("n ").ok_or(UnknownCommand)?;
                let (seat, name) = rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));
                let seat: usize = seat.parse().map_err(|_| UnknownCommand)?;
                if seat == 0 {
                    return Err(UnknownCommand);
                }
                Ok(SetupCommand::Rename(seat - 1, name.trim().to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Saved language preference the terminal writes to and follows.
///
/// Language commands save through the store. Every change the store
/// publishes, including its own, reloads the lexicon for the new language.
#[derive(Debug)]
pub struct LanguagePreference {
    store: SettingsStore,
    updates: watch::Receiver<Language>,
    lexicon: Option<PathBuf>,
}

impl LanguagePreference {
    /// Follows `store`. A `lexicon` file, when given, replaces the bundled
    /// lexicon for every language.
    pub fn new(store: SettingsStore, lexicon: Option<PathBuf>) -> Self {
        let updates = store.subscribe();
        Self {
            store,
            updates,
            lexicon,
        }
    }

    /// Returns the store being followed.
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }
}

/// Terminal front end over any line input and text output.
#[derive(Debug)]
pub struct Terminal<I, O> {
    input: I,
    output: O,
    preference: Option<LanguagePreference>,
}

impl<I: BufRead, O: Write> Terminal<I, O> {
    /// Creates a front end reading from `input` and writing to `output`.
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            preference: None,
        }
    }

    /// Saves language commands to `preference` and follows its changes.
    pub fn with_language_preference(mut self, preference: LanguagePreference) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Returns the output sink.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Runs rounds until the players quit or input ends.
    ///
    /// # Errors
    ///
    /// Fails only on I/O errors; game errors are shown and re-prompted.
    #[instrument(skip_all)]
    pub fn run<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
    ) -> Result<()> {
        loop {
            let flow = match session.phase() {
                Phase::Configuring => self.configure(session)?,
                Phase::Revealing => self.reveal(session)?,
                Phase::Voting => self.vote(session)?,
                Phase::Concluded => self.conclude(session)?,
            };
            if flow == Flow::Quit {
                debug!("Leaving terminal loop");
                return Ok(());
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}> ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn configure<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
    ) -> Result<Flow> {
        self.follow_preference(session)?;

        let config = session.config();
        writeln!(
            self.output,
            "\nPlayers: {}  Undercover: {}",
            config.player_count(),
            config.minority_count()
        )?;
        for player in session.players() {
            writeln!(self.output, "  {}. {}", player.index() + 1, player)?;
        }

        let Some(line) = self.read_line(
            "[Enter] start  [+p/-p] players  [+m/-m] undercover  [n <seat> <name>] rename  [l <it|en>] language  [q] quit",
        )?
        else {
            return Ok(Flow::Quit);
        };

        let Ok(command) = line.parse::<SetupCommand>() else {
            writeln!(self.output, "Unknown command: {}", line.trim())?;
            return Ok(Flow::Continue);
        };

        let result = match command {
            SetupCommand::Quit => return Ok(Flow::Quit),
            SetupCommand::Start => session.start_round(),
            SetupCommand::AddPlayer => session.increment_players().map(drop),
            SetupCommand::RemovePlayer => session.decrement_players().map(drop),
            SetupCommand::AddMinority => session.increment_minority().map(drop),
            SetupCommand::RemoveMinority => session.decrement_minority().map(drop),
            SetupCommand::Rename(seat, name) => session.set_name(seat, name),
            SetupCommand::Language(language) => {
                self.switch_language(session, language)?;
                return Ok(Flow::Continue);
            }
        };
        if let Err(e) = result {
            writeln!(self.output, "Error: {}", e)?;
        }
        Ok(Flow::Continue)
    }

    fn switch_language<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
        language: Language,
    ) -> Result<()> {
        let Some(preference) = &self.preference else {
            return self.apply_language(session, language, None);
        };
        if let Err(e) = preference.store.set_language(language) {
            warn!(error = %e, "Language preference not saved");
            writeln!(self.output, "Error: {}", e)?;
            return Ok(());
        }
        self.follow_preference(session)
    }

    /// Applies the latest saved language, if it changed since last seen.
    fn follow_preference<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
    ) -> Result<()> {
        let Some(preference) = &mut self.preference else {
            return Ok(());
        };
        // a closed channel means the store is gone; nothing left to follow
        if !preference.updates.has_changed().unwrap_or(false) {
            return Ok(());
        }
        let language = *preference.updates.borrow_and_update();
        let lexicon = preference.lexicon.clone();
        self.apply_language(session, language, lexicon)
    }

    fn apply_language<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
        language: Language,
        lexicon: Option<PathBuf>,
    ) -> Result<()> {
        match lexicons::load(language, lexicon.as_deref()) {
            Ok(words) => {
                session.set_language(language, words);
                writeln!(self.output, "Language: {}", language.native_name())?;
            }
            Err(e) => writeln!(self.output, "Error: {:#}", e)?,
        }
        Ok(())
    }

    fn reveal<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
    ) -> Result<Flow> {
        let (Some(player), Some(turn)) = (session.current_player(), session.current_turn()) else {
            return Ok(Flow::Continue);
        };
        writeln!(
            self.output,
            "\nPass the device to {} ({}/{}).",
            player,
            turn + 1,
            session.players().len()
        )?;

        match self.read_line("[Enter] show your word  [q] quit")? {
            None => return Ok(Flow::Quit),
            Some(line) if line.trim() == "q" => return Ok(Flow::Quit),
            Some(_) => {}
        }

        session.toggle_reveal()?;
        if let Some(word) = session.visible_word() {
            writeln!(self.output, "Your word: {}", word)?;
        }

        let line = self.read_line("[Enter] hide and pass the device")?;
        session.toggle_reveal()?;
        writeln!(self.output, "{}", "\n".repeat(SCROLL_AWAY))?;
        if line.is_none() {
            return Ok(Flow::Quit);
        }

        session.advance_turn()?;
        if session.phase() == Phase::Voting {
            writeln!(self.output, "Everyone has seen their word. Discuss, then vote.")?;
        }
        Ok(Flow::Continue)
    }

    fn vote<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
    ) -> Result<Flow> {
        let players = session.players();
        writeln!(
            self.output,
            "\nStill in play ({} undercover hidden):",
            session.remaining_minority().unwrap_or(0)
        )?;
        for seat in session.eligible_players() {
            writeln!(self.output, "  {}. {}", seat + 1, players[seat])?;
        }

        let Some(line) = self.read_line("Vote for seat number  [q] quit")? else {
            return Ok(Flow::Quit);
        };
        let line = line.trim();
        if line == "q" {
            return Ok(Flow::Quit);
        }

        let Some(target) = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            writeln!(self.output, "Enter a seat number")?;
            return Ok(Flow::Continue);
        };

        match session.cast_vote(target) {
            Ok(outcome) => {
                let name = &players[outcome.target];
                if outcome.was_minority {
                    writeln!(
                        self.output,
                        "{} was undercover! {} left.",
                        name, outcome.remaining_minority
                    )?;
                } else {
                    writeln!(self.output, "{} was not undercover.", name)?;
                }
            }
            Err(_) if !session.is_eligible(target) => {
                writeln!(self.output, "Seat {} cannot be voted on", target + 1)?;
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn conclude<R: RandomSource>(
        &mut self,
        session: &mut GameSession<Lexicon, R>,
    ) -> Result<Flow> {
        if let Some(outcome) = session.outcome() {
            let banner = match outcome {
                Outcome::MinorityCaught => "Majority wins.",
                Outcome::MinorityWins { .. } => "Undercover wins.",
            };
            writeln!(self.output, "\n{} {}", banner, outcome)?;
        }
        if let Some(pair) = session.word_pair() {
            writeln!(
                self.output,
                "Category: {}  Majority word: {}  Undercover word: {}",
                pair.category(),
                pair.majority(),
                pair.minority()
            )?;
        }
        let players = session.players();
        let undercover: Vec<String> = session
            .roles()
            .iter()
            .enumerate()
            .filter(|(_, role)| **role == Role::Minority)
            .map(|(seat, _)| players[seat].to_string())
            .collect();
        writeln!(self.output, "Undercover: {}", undercover.join(", "))?;

        match self.read_line("[Enter] new round  [s] setup  [q] quit")? {
            None => Ok(Flow::Quit),
            Some(line) => match line.trim() {
                "q" => Ok(Flow::Quit),
                "s" => {
                    session.reset_round();
                    Ok(Flow::Continue)
                }
                _ => {
                    if let Err(e) = session.start_round() {
                        writeln!(self.output, "Error: {}", e)?;
                        session.reset_round();
                    }
                    Ok(Flow::Continue)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;
    use undercover_core::{GameConfig, ScriptedRng};

    fn session() -> GameSession<Lexicon, ScriptedRng> {
        let config = GameConfig::new(3, 1, Vec::new(), Language::English).unwrap();
        let lexicon = Lexicon::new([("animals", vec!["cat".to_string(), "dog".to_string()])]);
        // roles [Maj, Maj, Min]; words: minority "cat", majority "dog"
        GameSession::new(config, lexicon, ScriptedRng::new([0, 0, 0, 0, 1]))
    }

    fn play(session: &mut GameSession<Lexicon, ScriptedRng>, input: &str) -> String {
        let mut terminal = Terminal::new(Cursor::new(input.to_string()), Vec::new());
        terminal.run(session).unwrap();
        String::from_utf8(terminal.into_output()).unwrap()
    }

    #[test]
    fn test_setup_commands_parse() {
        assert_eq!("".parse::<SetupCommand>(), Ok(SetupCommand::Start));
        assert_eq!("+m".parse::<SetupCommand>(), Ok(SetupCommand::AddMinority));
        assert_eq!(
            "n 2 Ada Lovelace".parse::<SetupCommand>(),
            Ok(SetupCommand::Rename(1, "Ada Lovelace".to_string()))
        );
        assert_eq!("n 0 Ada".parse::<SetupCommand>(), Err(UnknownCommand));
        assert_eq!(
            "l it".parse::<SetupCommand>(),
            Ok(SetupCommand::Language(Language::Italian))
        );
        assert_eq!("l fr".parse::<SetupCommand>(), Err(UnknownCommand));
        assert_eq!("jump".parse::<SetupCommand>(), Err(UnknownCommand));
    }

    #[test]
    fn test_full_round() {
        let mut session = session();
        let output = play(&mut session, "\n\n\n\n\n\n\n1\n3\nq\n");

        assert!(output.contains("Pass the device to Player 1 (1/3)."));
        assert!(output.contains("Your word: dog"));
        assert!(output.contains("Your word: cat"));
        assert!(output.contains("Player 1 was not undercover."));
        assert!(output.contains("Player 3 was undercover! 0 left."));
        assert!(output.contains("Majority wins."));
        assert!(output.contains("Undercover: Player 3"));
        assert_eq!(session.phase(), Phase::Concluded);
    }

    #[test]
    fn test_bad_vote_reprompts() {
        let mut session = session();
        let output = play(&mut session, "\n\n\n\n\n\n\n1\n1\nx\n9\n");

        assert!(output.contains("Seat 1 cannot be voted on"));
        assert!(output.contains("Enter a seat number"));
        assert!(output.contains("Seat 9 cannot be voted on"));
        assert_eq!(session.phase(), Phase::Voting);
        assert_eq!(session.votes().len(), 1);
    }

    #[test]
    fn test_setup_edits_before_start() {
        let mut session = session();
        let output = play(&mut session, "+p\nn 1 Ada\n+m\nq\n");

        assert!(output.contains("Players: 4  Undercover: 2"));
        assert!(output.contains("1. Ada"));
        assert_eq!(session.phase(), Phase::Configuring);
    }

    #[test]
    fn test_rename_missing_seat_reports_error() {
        let mut session = session();
        let output = play(&mut session, "n 7 Ada\n");
        assert!(output.contains("Error: Invalid configuration: no player at seat 7"));
    }

    #[test]
    fn test_language_command_relabels_players() {
        let mut session = session();
        let output = play(&mut session, "l it\n");

        assert!(output.contains("Language: Italiano"));
        assert!(output.contains("1. Giocatore 1"));
        assert!(output.contains("3. Giocatore 3"));
        assert_eq!(*session.config().language(), Language::Italian);
        assert_eq!(session.phase(), Phase::Configuring);
    }

    #[test]
    fn test_language_command_saves_preference() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("settings.toml");
        let store = SettingsStore::open(&path).expect("Open failed");
        let mut session = session();

        let mut terminal = Terminal::new(Cursor::new("l it\nl en\n".to_string()), Vec::new())
            .with_language_preference(LanguagePreference::new(store, None));
        terminal.run(&mut session).unwrap();
        let output = String::from_utf8(terminal.into_output()).unwrap();

        let giocatore = output.find("1. Giocatore 1").expect("Italian labels shown");
        let player = output.rfind("1. Player 1").expect("English labels shown");
        assert!(giocatore < player);
        assert_eq!(*session.config().language(), Language::English);

        let saved = std::fs::read_to_string(&path).expect("Settings file written");
        assert!(saved.contains("language = \"en\""));
    }

    #[test]
    fn test_language_switch_keeps_names() {
        let mut session = session();
        let output = play(&mut session, "n 2 Ada\nl it\n");

        assert!(output.contains("2. Ada"));
        assert!(output.contains("3. Giocatore 3"));
    }
}
