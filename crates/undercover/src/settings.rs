//! Language preference store.
//!
//! A single `language` key persisted as TOML. Readers subscribe to a
//! [`watch::Receiver`] that always holds the current value.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, info, instrument};
use undercover_core::Language;

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Preferred game language.
    #[serde(default)]
    language: Language,
}

impl Settings {
    /// Creates settings with the given language.
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(language = %settings.language, "Settings loaded");
        Ok(settings)
    }

    /// Writes settings to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be written.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = toml::to_string(self)
            .map_err(|e| SettingsError::new(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| SettingsError::new(format!("Failed to write settings file: {}", e)))?;

        debug!("Settings saved");
        Ok(())
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// File-backed language preference with a current-value stream.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    sender: watch::Sender<Language>,
}

impl SettingsStore {
    /// Opens the store at `path`. A missing file means default settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file exists but cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let settings = if path.exists() {
            Settings::from_file(&path)?
        } else {
            debug!("No settings file yet; using defaults");
            Settings::default()
        };

        let (sender, _) = watch::channel(settings.language);
        Ok(Self { path, sender })
    }

    /// Opens the store at [`SettingsStore::default_path`].
    ///
    /// # Errors
    ///
    /// See [`SettingsStore::open`].
    pub fn open_default() -> Result<Self, SettingsError> {
        Self::open(Self::default_path())
    }

    /// Returns the default settings file path.
    ///
    /// Resolution order:
    /// 1. `$UNDERCOVER_SETTINGS` environment variable
    /// 2. `$XDG_CONFIG_HOME/undercover/settings.toml`
    /// 3. `$HOME/.config/undercover/settings.toml`
    /// 4. `./settings.toml`
    #[instrument]
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("UNDERCOVER_SETTINGS") {
            debug!(path = %path, "Using UNDERCOVER_SETTINGS env var");
            return PathBuf::from(path);
        }

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg).join("undercover").join("settings.toml");
            debug!(path = %path.display(), "Using XDG_CONFIG_HOME path");
            return path;
        }

        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home)
                .join(".config")
                .join("undercover")
                .join("settings.toml");
            debug!(path = %path.display(), "Using HOME path");
            return path;
        }

        debug!("Falling back to ./settings.toml");
        PathBuf::from("settings.toml")
    }

    /// Path the store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current language.
    pub fn language(&self) -> Language {
        *self.sender.borrow()
    }

    /// Subscribes to language changes. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.sender.subscribe()
    }

    /// Persists `language` and publishes it to subscribers.
    ///
    /// Subscribers are only notified once the file has been written.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be written.
    #[instrument(skip(self))]
    pub fn set_language(&self, language: Language) -> Result<(), SettingsError> {
        Settings::new(language).save(&self.path)?;
        self.sender.send_replace(language);
        info!(%language, "Language preference saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_language_key_defaults_to_italian() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(*settings.language(), Language::Italian);
    }

    #[test]
    fn test_error_records_location() {
        let err = SettingsError::new("boom".to_string());
        assert!(err.file.ends_with("settings.rs"));
        assert!(err.to_string().starts_with("Settings error: boom at "));
    }
}
