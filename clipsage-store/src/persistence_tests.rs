//! Persistence round-trip and edge case tests.
//!
//! Settings and the activity log share one directory; both must survive a
//! reload and tolerate files written by older versions.

use tempfile::TempDir;

use crate::activity_log::ActivityLog;
use crate::persistence::{ensure_dir, load_json, save_json};
use crate::settings_store::{Settings, SettingsStore};
use clipsage_core::{ConfigStore, PresetSlot, ProviderId};

#[tokio::test]
async fn test_settings_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    let store = SettingsStore::new(path.clone());
    store.set_api_key(ProviderId::Gemini, "AIza-1").await.unwrap();
    store
        .set_custom_instructions(Some("Answer in French.".to_string()))
        .await
        .unwrap();
    store
        .set_preset(PresetSlot::TWO, Some("Hello".to_string()))
        .await
        .unwrap();

    let loaded: Settings = load_json(&path).await.unwrap();
    assert_eq!(loaded, store.get().await);
}

#[tokio::test]
async fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    tokio::fs::write(&path, r#"{"selectedProvider": "groq"}"#)
        .await
        .unwrap();

    let store = SettingsStore::load(path).await;
    assert_eq!(store.selected_provider().await, ProviderId::Groq);
    assert!(store.preset(PresetSlot::ONE).await.is_none());
    assert!(store.get().await.custom_instructions.is_none());
}

#[tokio::test]
async fn test_unknown_fields_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    tokio::fs::write(
        &path,
        r#"{"selectedProvider": "gemini", "theme": "dark", "providers": {"gemini": {"apiKey": "k", "legacy": 1}}}"#,
    )
    .await
    .unwrap();

    let store = SettingsStore::load(path).await;
    assert_eq!(store.api_key(ProviderId::Gemini).await.as_deref(), Some("k"));
}

#[tokio::test]
async fn test_settings_and_log_share_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("clipsage");
    ensure_dir(&dir).await.unwrap();

    let store = SettingsStore::new(dir.join("settings.json"));
    store.set_selected_provider(ProviderId::Groq).await.unwrap();

    let log = ActivityLog::new(dir.join("activity_log.json"));
    log.append(clipsage_core::ActivityLogEntry::info("hello"))
        .await
        .unwrap();

    assert!(dir.join("settings.json").exists());
    assert!(dir.join("activity_log.json").exists());
}

#[tokio::test]
async fn test_save_json_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");

    save_json(&path, &vec!["a"]).await.unwrap();
    save_json(&path, &vec!["b", "c"]).await.unwrap();

    let loaded: Vec<String> = load_json(&path).await.unwrap();
    assert_eq!(loaded, vec!["b", "c"]);
}
