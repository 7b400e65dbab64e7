//! Settings file round-trips.

use crm_cli::settings::{Overrides, Settings};
use crm_search_select::RefocusPolicy;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("search.toml");

    let mut settings = Settings::default();
    settings.lookup.collection = "contacts".to_string();
    settings.lookup.auth_token = Some("abc123".to_string());
    settings.search.debounce_ms = 150;
    settings.search.refocus = RefocusPolicy::Requery;
    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.toml"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_invalid_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("search.toml");
    std::fs::write(&path, "[search]\ndebounce_ms = \"soon\"\n").unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_default_file_omits_token() {
    let toml = Settings::default().to_toml().unwrap();
    assert!(toml.contains("base_url = \"http://localhost:8000/api\""));
    assert!(toml.contains("debounce_ms = 300"));
    assert!(toml.contains("refocus = \"reuse_cache\""));
    assert!(!toml.contains("auth_token"));
}

#[test]
fn test_flags_win_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("search.toml");
    std::fs::write(&path, "[lookup]\ncollection = \"contacts\"\n").unwrap();

    let settings = Settings::load_from(&path).with_overrides(&Overrides {
        collection: Some("vendors".to_string()),
        debounce_ms: Some(0),
        ..Default::default()
    });

    assert_eq!(settings.lookup.collection, "vendors");
    assert_eq!(settings.search.debounce_ms, 0);
}
