//! Prompt builder for the remote capability provider.
//!
//! [`PromptBuilder`] produces `(system_msg, user_msg)` pairs for an
//! OpenAI-compatible `/v1/chat/completions` endpoint, one per capability.
//! Every instruction asks for the bare answer so the reply can be used
//! without post-processing beyond trimming.

use crate::language::display_name;

// ---------------------------------------------------------------------------
// System instructions
// ---------------------------------------------------------------------------

const SYSTEM_DETECT: &str = "\
You are a language identification service.
Task: Identify the language of the text the user sends.

Rules:
1. Reply with ONLY the ISO 639-1 two-letter code in lower case (e.g. en, es, fr).
2. If the language cannot be determined, reply with: unknown
3. Do not explain, translate or repeat the text.";

const SYSTEM_TRANSLATE: &str = "\
You are a professional translator.
Task: Translate the text the user sends into the requested language.

Rules:
1. Preserve meaning, tone, names, numbers and formatting.
2. Reply with ONLY the translation — no notes, quotes or explanation.
3. If the text is already in the target language, return it unchanged.";

const SYSTEM_SUMMARIZE: &str = "\
You are a summarization assistant.
Task: Summarize the text the user sends.

Rules:
1. Write one to three sentences in the same language as the text.
2. Keep key facts, names and numbers.
3. Reply with ONLY the summary — no preamble.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds chat prompts for each capability.
///
/// # Example
/// ```rust
/// use text_annotator::provider::PromptBuilder;
///
/// let (system, user) = PromptBuilder::new().translate("Hola", "es", "en");
/// assert!(system.contains("translator"));
/// assert!(user.contains("English"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, text: &str) -> (String, String) {
        (SYSTEM_DETECT.to_string(), format!("Text:\n{text}\n\nLanguage code:"))
    }

    /// `source` may be [`UNDETERMINED`](crate::language::UNDETERMINED), in
    /// which case the model is told to work out the source itself.
    pub fn translate(&self, text: &str, source: &str, target: &str) -> (String, String) {
        let from = match crate::language::normalize(source) {
            Some(code) => format!("from {} ", display_name(&code)),
            None => String::new(),
        };
        let user_msg = format!(
            "Translate {from}into {}:\n{text}\n\nTranslation:",
            display_name(target)
        );
        (SYSTEM_TRANSLATE.to_string(), user_msg)
    }

    pub fn summarize(&self, text: &str) -> (String, String) {
        (SYSTEM_SUMMARIZE.to_string(), format!("Text:\n{text}\n\nSummary:"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
