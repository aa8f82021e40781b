//! Serde tests for core types.
//!
//! These pin the JSON shapes that land in the settings file and activity log.

use std::time::Duration;

use crate::{
    ActivityLogEntry, PresetSlot, ProcessingAttempt, ProcessingResult, ProviderConfig, ProviderId,
    Severity,
};

// ============================================================================
// ProviderId Serde Tests
// ============================================================================

#[test]
fn test_provider_id_deserialize_lowercase() {
    let test_cases = vec![
        (r#""gemini""#, ProviderId::Gemini),
        (r#""groq""#, ProviderId::Groq),
    ];

    for (json, expected) in test_cases {
        let result: ProviderId = serde_json::from_str(json).unwrap();
        assert_eq!(result, expected, "Failed for {json}");
    }
}

#[test]
fn test_provider_id_invalid_deserialize() {
    let result: Result<ProviderId, _> = serde_json::from_str(r#""openai""#);
    assert!(result.is_err());
}

// ============================================================================
// Severity / Activity Serde Tests
// ============================================================================

#[test]
fn test_severity_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Severity::Success).unwrap(), r#""success""#);
    assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), r#""error""#);
}

#[test]
fn test_activity_entry_shape() {
    let entry = ActivityLogEntry {
        timestamp: "10:00:00".to_string(),
        message: "Copied to clipboard".to_string(),
        severity: Severity::Success,
    };
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["timestamp"], "10:00:00");
    assert_eq!(value["severity"], "success");
}

// ============================================================================
// Preset Serde Tests
// ============================================================================

#[test]
fn test_preset_slot_serializes_as_number() {
    assert_eq!(serde_json::to_string(&PresetSlot::THREE).unwrap(), "3");
    let slot: PresetSlot = serde_json::from_str("1").unwrap();
    assert_eq!(slot, PresetSlot::ONE);
    assert!(serde_json::from_str::<PresetSlot>("7").is_err());
}

// ============================================================================
// Processing Serde Tests
// ============================================================================

#[test]
fn test_attempt_duration_in_millis() {
    let attempt = ProcessingAttempt::rate_limited("m1", "HTTP 429", Duration::from_millis(250));
    let value = serde_json::to_value(&attempt).unwrap();
    assert_eq!(value["duration"], 250);
    assert_eq!(value["outcome"]["kind"], "rate_limited");
    assert_eq!(value["outcome"]["detail"], "HTTP 429");
}

#[test]
fn test_processing_result_tagged() {
    let result = ProcessingResult::answer("ANSWER", Some("m3".to_string()));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["status"], "answer");
    assert_eq!(value["model"], "m3");

    let failed: ProcessingResult =
        serde_json::from_str(r#"{"status":"failed","message":"Error: Clipboard is empty"}"#)
            .unwrap();
    assert_eq!(failed.clipboard_text(), "Error: Clipboard is empty");
}

#[test]
fn test_provider_config_roundtrip_keeps_index() {
    let config = ProviderConfig::new(ProviderId::Gemini)
        .with_api_key("k")
        .with_current_model("gemini-2.5-flash");
    let json = serde_json::to_string(&config).unwrap();
    let back: ProviderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.start_index(), 2);
    assert_eq!(back, config);
}
