//! Transcript rendering for message records.
//!
//! One record renders as its text followed by an indented line per
//! enrichment that has been requested.  Slots still at `NotRequested`
//! produce no line.

use std::fmt::Write as _;

use crate::language;
use crate::store::{DetectedLanguage, MessageRecord, SummarySlot, TranslationSlot};

const INDENT: &str = "    ";

/// Render the whole record as transcript text.
pub fn render_record(record: &MessageRecord) -> String {
    let mut out = format!("{} {}", record.id, record.text.trim_end());

    let lines = [
        Some(language_line(&record.detected_language)),
        translation_line(&record.translation),
        summary_line(&record.summary),
    ];
    for line in lines.into_iter().flatten() {
        let _ = write!(out, "\n{INDENT}{line}");
    }
    out
}

/// `"Detected Language: es (Spanish)"`, `"Detected Language: Unknown"` or
/// `"Detecting language…"`.
pub fn language_line(language: &DetectedLanguage) -> String {
    match language {
        DetectedLanguage::Pending => "Detecting language…".to_string(),
        DetectedLanguage::Unknown => "Detected Language: Unknown".to_string(),
        DetectedLanguage::Code(code) => {
            let name = language::display_name(code);
            if name == *code {
                format!("Detected Language: {code}")
            } else {
                format!("Detected Language: {code} ({name})")
            }
        }
    }
}

pub fn translation_line(slot: &TranslationSlot) -> Option<String> {
    match slot {
        TranslationSlot::NotRequested => None,
        TranslationSlot::InProgress { target } => Some(format!("Translating to {target}…")),
        TranslationSlot::Done(t) => Some(format!("Translation ({}): {}", t.target, t.text.trim())),
        TranslationSlot::Failed { target, reason } => Some(format!(
            "Translation to {target} failed: {}",
            reason.label()
        )),
    }
}

pub fn summary_line(slot: &SummarySlot) -> Option<String> {
    match slot {
        SummarySlot::NotRequested => None,
        SummarySlot::InProgress => Some("Summarizing…".to_string()),
        SummarySlot::Done(text) => Some(format!("Summary: {}", text.trim())),
        SummarySlot::Failed(reason) => Some(format!("Summary failed: {}", reason.label())),
    }
}
