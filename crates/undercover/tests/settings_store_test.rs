//! Tests for the file-backed language preference.

use std::fs;
use tempfile::TempDir;

use undercover::{Settings, SettingsStore};
use undercover_core::Language;

#[test]
fn test_missing_file_defaults_to_italian() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SettingsStore::open(dir.path().join("settings.toml")).expect("Open failed");

    assert_eq!(store.language(), Language::Italian);
    assert!(!store.path().exists());
}

#[test]
fn test_set_language_persists_and_reloads() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("settings.toml");

    let store = SettingsStore::open(&path).expect("Open failed");
    store.set_language(Language::English).expect("Save failed");

    let content = fs::read_to_string(&path).expect("Settings file written");
    assert!(content.contains("language = \"en\""));

    let reopened = SettingsStore::open(&path).expect("Reopen failed");
    assert_eq!(reopened.language(), Language::English);
}

#[test]
fn test_subscribers_see_changes() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SettingsStore::open(dir.path().join("settings.toml")).expect("Open failed");

    let mut updates = store.subscribe();
    assert_eq!(*updates.borrow(), Language::Italian);
    assert!(!updates.has_changed().expect("Sender alive"));

    store.set_language(Language::English).expect("Save failed");
    assert!(updates.has_changed().expect("Sender alive"));
    assert_eq!(*updates.borrow_and_update(), Language::English);
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("settings.toml");
    fs::write(&path, "language = \"fr\"").expect("Write failed");

    let err = SettingsStore::open(&path).expect_err("Unknown code must be rejected");
    assert!(err.message.contains("Failed to parse settings"));
}

#[test]
fn test_settings_round_trip_through_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("settings.toml");

    Settings::new(Language::English).save(&path).expect("Save failed");
    let loaded = Settings::from_file(&path).expect("Load failed");
    assert_eq!(*loaded.language(), Language::English);
}
