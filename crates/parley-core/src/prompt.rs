//! Built-in system prompt catalog.
//!
//! A fixed, process-wide mapping from [`PromptType`] names to instruction
//! text. Read-only: there is no way to register prompts at runtime.
//!
//! The texts are English renderings of the Vietnamese prompts the gateway
//! first shipped with. They carry the same instructions but are not
//! word-for-word, so model output may differ from a Vietnamese deployment.

use parley_types::prompt::PromptType;

// English renderings; see the module docs.
const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a helpful, polite, and honest AI assistant.
You always try to provide accurate and useful information.
When you do not know the answer, you say so instead of guessing.";

const PROGRAMMING_ASSISTANT_PROMPT: &str = "\
You are a professional programming assistant.
When asked about code, you give short, clear examples that actually run.
You favor Python but are fluent in many other programming languages.
You explain code in an approachable way and recommend best practices.";

const WRITING_ASSISTANT_PROMPT: &str = "\
You are a professional writing assistant.
You help improve text, fix grammar mistakes, and suggest better phrasing.
You can draft and edit many kinds of documents: emails, reports, articles, and more.
You always keep a tone that fits the purpose and audience of the text.";

const EDUCATION_ASSISTANT_PROMPT: &str = "\
You are a friendly and patient educational assistant.
You explain complex concepts in simple, easy-to-understand terms.
You encourage critical thinking and asking questions.
You use examples and comparisons to clarify difficult ideas.";

/// Instruction text for a prompt type.
pub fn prompt_text(prompt_type: PromptType) -> &'static str {
    match prompt_type {
        PromptType::Default => DEFAULT_SYSTEM_PROMPT,
        PromptType::Programming => PROGRAMMING_ASSISTANT_PROMPT,
        PromptType::Writing => WRITING_ASSISTANT_PROMPT,
        PromptType::Education => EDUCATION_ASSISTANT_PROMPT,
    }
}

/// Read-only lookup over the built-in prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCatalog;

impl PromptCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Text for `name`, or `None` if the name is not in the catalog.
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        name.parse::<PromptType>().ok().map(prompt_text)
    }

    /// All prompt names, in catalog order.
    pub fn list_names(&self) -> Vec<&'static str> {
        PromptType::ALL.iter().map(PromptType::as_str).collect()
    }

    /// The prompt every new session starts with.
    pub fn default_prompt(&self) -> &'static str {
        prompt_text(PromptType::Default)
    }
}
