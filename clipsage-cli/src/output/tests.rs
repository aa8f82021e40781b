//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use clipsage_core::{ActivityLogEntry, ProcessingResult, Severity};

    fn entry(message: &str, severity: Severity) -> ActivityLogEntry {
        ActivityLogEntry {
            timestamp: "14:03:27".to_string(),
            message: message.to_string(),
            severity,
        }
    }

    #[test]
    fn test_answer_with_model() {
        let formatter = TextFormatter::new(false);
        let result = ProcessingResult::answer("Paris.", Some("gemini-2.5-flash".to_string()));
        assert_eq!(formatter.format_result(&result), "Paris.\n✓ gemini-2.5-flash");
    }

    #[test]
    fn test_preset_answer_is_plain() {
        let formatter = TextFormatter::new(true);
        let result = ProcessingResult::answer("Hello", None);
        assert_eq!(formatter.format_result(&result), "Hello");
    }

    #[test]
    fn test_failure_is_red() {
        let formatter = TextFormatter::new(true);
        let result = ProcessingResult::failed("Error: Clipboard is empty");
        let output = formatter.format_result(&result);
        assert!(output.contains("\x1b[31m"));
        assert!(output.contains("Error: Clipboard is empty"));
    }

    #[test]
    fn test_log_entry_without_colors() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_log_entry(&entry("Read 42 characters", Severity::Success)),
            "14:03:27 OK    Read 42 characters"
        );
    }

    #[test]
    fn test_empty_log() {
        let formatter = TextFormatter::new(false);
        assert!(formatter.format_log(&[]).starts_with("No activity yet"));
    }

    #[test]
    fn test_log_keeps_order() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_log(&[
            entry("second", Severity::Info),
            entry("first", Severity::Error),
        ]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("second"));
        assert!(lines[1].contains("ERROR"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{ConfigOutput, JsonFormatter, ProviderInfoOutput, mask_key};
    use clipsage_core::{PresetSlot, ProviderConfig, ProviderId};
    use clipsage_providers::ProviderRegistry;
    use clipsage_store::Settings;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("AIzaSyD-1234567890abcd"), "AIza...abcd");
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("ab"), "****");
    }

    #[test]
    fn test_config_output_masks_keys() {
        let mut settings = Settings::default();
        settings.presets.set(PresetSlot::TWO, Some("Hello".to_string()));
        let providers = vec![
            ProviderConfig::new(ProviderId::Gemini).with_api_key("AIzaSyD-1234567890abcd"),
            ProviderConfig::new(ProviderId::Groq),
        ];

        let output = ConfigOutput::new(&settings, &providers);
        let json = JsonFormatter::new(false).format(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["selectedProvider"], "gemini");
        assert_eq!(value["providers"][0]["apiKey"], "AIza...abcd");
        assert!(value["providers"][1].get("apiKey").is_none());
        assert_eq!(value["presets"][1]["slot"], 2);
        assert_eq!(value["presets"][1]["text"], "Hello");
        assert!(!json.contains("1234567890"));
    }

    #[test]
    fn test_provider_info_output() {
        let desc = ProviderRegistry::get(ProviderId::Groq).unwrap();
        let config = ProviderConfig::new(ProviderId::Groq).with_api_key("gsk");
        let info = ProviderInfoOutput::new(desc, &config, true);

        assert_eq!(info.id, "groq");
        assert!(info.key_configured);
        assert!(!info.supports_failover);
        assert_eq!(info.current_model.as_deref(), Some("openai/gpt-oss-120b"));
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert!(output.contains('\n'));
    }
}
