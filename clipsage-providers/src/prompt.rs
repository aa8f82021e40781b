//! The system prompt shared by both vendors.

/// Base instructions sent ahead of every user text.
pub const BASE_SYSTEM_PROMPT: &str = "You are a helpful academic assistant. Provide responses at a B2 academic level (CEFR), appropriate for a 14-year-old student. Use formal but accessible language. Avoid slang, casual expressions, and em-dashes.

IMPORTANT:
- If the user asks to \"rewrite\", \"improve\", \"fix\", \"expand\", \"make better\", or similar requests about text they've provided, provide the FULL rewritten version professionally.
- For simple questions without text to rewrite, keep answers to ONE sentence unless more detail is needed.
- Always maintain formal, professional tone suitable for school assignments.";

/// Builds the system prompt, appending non-blank custom instructions.
pub fn system_prompt(custom_instructions: Option<&str>) -> String {
    match custom_instructions.filter(|c| !c.trim().is_empty()) {
        Some(custom) => format!("{BASE_SYSTEM_PROMPT}\n\nADDITIONAL INSTRUCTIONS: {custom}"),
        None => BASE_SYSTEM_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prompt() {
        let prompt = system_prompt(None);
        assert!(prompt.contains("B2 academic level"));
        assert!(!prompt.contains("ADDITIONAL INSTRUCTIONS"));
        assert_eq!(system_prompt(Some("   ")), prompt);
    }

    #[test]
    fn test_custom_instructions_appended() {
        let prompt = system_prompt(Some("Answer in French."));
        assert!(prompt.ends_with("\n\nADDITIONAL INSTRUCTIONS: Answer in French."));
    }
}
