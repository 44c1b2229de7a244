//! Transcript assembly.
//!
//! The backend receives one linear text: a system line, then one line per
//! message as `<Role>: <content>` with the role capitalized. Every line,
//! the first included, starts with a newline.

use parley_types::chat::Message;

/// Render the system prompt and history as a single transcript.
pub fn build_transcript(history: &[Message], system_prompt: &str) -> String {
    let mut transcript = format!("\nSystem: {system_prompt}");
    for message in history {
        transcript.push('\n');
        transcript.push_str(message.role.label());
        transcript.push_str(": ");
        transcript.push_str(&message.content);
    }
    transcript
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_is_system_line_only() {
        assert_eq!(build_transcript(&[], "Be kind."), "\nSystem: Be kind.");
    }

    #[test]
    fn test_roles_are_capitalized_in_order() {
        let history = vec![
            Message::user("hello"),
            Message::assistant("hi there"),
            Message::user("how are you?"),
        ];
        assert_eq!(
            build_transcript(&history, "Be kind."),
            "\nSystem: Be kind.\nUser: hello\nAssistant: hi there\nUser: how are you?"
        );
    }

    #[test]
    fn test_multiline_content_is_kept_verbatim() {
        let history = vec![Message::user("line one\nline two")];
        assert_eq!(
            build_transcript(&history, "S"),
            "\nSystem: S\nUser: line one\nline two"
        );
    }
}
