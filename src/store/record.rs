//! Message records and the per-operation slots they carry.
//!
//! A [`MessageRecord`] is one submitted text plus whatever the annotation
//! pipeline has attached to it so far.  Each enrichment lives in its own
//! slot so that a partial record (detected but not translated, translated
//! but summary failed …) is representable without sentinel strings.

use std::fmt;

// ---------------------------------------------------------------------------
// MessageId
// ---------------------------------------------------------------------------

/// Stable identifier of a record: its insertion position in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub usize);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// DetectedLanguage
// ---------------------------------------------------------------------------

/// Result of the detect step.
///
/// ```text
/// Pending ──detect──▶ Unknown | Code("es")      (exactly once)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetectedLanguage {
    /// Detection has not settled yet.
    #[default]
    Pending,
    /// Detection ran but produced no usable answer, or the provider failed.
    Unknown,
    /// ISO-639-1 code reported by the provider.
    Code(String),
}

impl DetectedLanguage {
    /// `true` once detection has settled, whatever the answer.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, DetectedLanguage::Pending)
    }

    /// The language code, if one was detected.
    pub fn code(&self) -> Option<&str> {
        match self {
            DetectedLanguage::Code(code) => Some(code),
            _ => None,
        }
    }

    /// Short label for display: the code, `"Unknown"` or `"Pending"`.
    pub fn label(&self) -> &str {
        match self {
            DetectedLanguage::Pending => "Pending",
            DetectedLanguage::Unknown => "Unknown",
            DetectedLanguage::Code(code) => code,
        }
    }
}

// ---------------------------------------------------------------------------
// OperationStatus / FailureReason
// ---------------------------------------------------------------------------

/// Coarse status of a single enrichment operation on a record.
///
/// ```text
/// NotRequested ──request──▶ InProgress ──▶ Done
///                                      └─▶ Failed ──retry──▶ InProgress
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    NotRequested,
    InProgress,
    Done,
    Failed,
}

/// Why an operation ended in its failure marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// No provider, or the provider never became ready.
    ProviderUnavailable,
    /// Transport, timeout or malformed provider answer.
    RequestFailed,
    /// The provider cannot translate between the two languages.
    LanguagePairUnsupported,
}

impl FailureReason {
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::ProviderUnavailable => "provider unavailable",
            FailureReason::RequestFailed => "request failed",
            FailureReason::LanguagePairUnsupported => "language pair unsupported",
        }
    }
}

// ---------------------------------------------------------------------------
// Translation slot
// ---------------------------------------------------------------------------

/// A successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub target: String,
    pub text: String,
}

/// Translation state of a record.  Every write replaces the whole slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TranslationSlot {
    #[default]
    NotRequested,
    InProgress { target: String },
    Done(Translation),
    Failed { target: String, reason: FailureReason },
}

impl TranslationSlot {
    pub fn status(&self) -> OperationStatus {
        match self {
            TranslationSlot::NotRequested => OperationStatus::NotRequested,
            TranslationSlot::InProgress { .. } => OperationStatus::InProgress,
            TranslationSlot::Done(_) => OperationStatus::Done,
            TranslationSlot::Failed { .. } => OperationStatus::Failed,
        }
    }

    /// The completed translation, if any.
    pub fn translation(&self) -> Option<&Translation> {
        match self {
            TranslationSlot::Done(t) => Some(t),
            _ => None,
        }
    }

    /// Target language of the latest request, if one was made.
    pub fn target(&self) -> Option<&str> {
        match self {
            TranslationSlot::NotRequested => None,
            TranslationSlot::InProgress { target } | TranslationSlot::Failed { target, .. } => {
                Some(target)
            }
            TranslationSlot::Done(t) => Some(&t.target),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary slot
// ---------------------------------------------------------------------------

/// Summary state of a record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SummarySlot {
    #[default]
    NotRequested,
    InProgress,
    Done(String),
    Failed(FailureReason),
}

impl SummarySlot {
    pub fn status(&self) -> OperationStatus {
        match self {
            SummarySlot::NotRequested => OperationStatus::NotRequested,
            SummarySlot::InProgress => OperationStatus::InProgress,
            SummarySlot::Done(_) => OperationStatus::Done,
            SummarySlot::Failed(_) => OperationStatus::Failed,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            SummarySlot::Done(text) => Some(text),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MessageRecord
// ---------------------------------------------------------------------------

/// One submitted text and its accumulated enrichment results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: MessageId,
    pub text: String,
    pub detected_language: DetectedLanguage,
    pub translation: TranslationSlot,
    pub summary: SummarySlot,
}

impl MessageRecord {
    pub(crate) fn new(id: MessageId, text: String) -> Self {
        Self {
            id,
            text,
            detected_language: DetectedLanguage::Pending,
            translation: TranslationSlot::NotRequested,
            summary: SummarySlot::NotRequested,
        }
    }

    /// Length of the text in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

// ---------------------------------------------------------------------------
// RecordPatch
// ---------------------------------------------------------------------------

/// Field-level update applied by [`MessageStore::update`](super::MessageStore::update).
///
/// `None` fields are left untouched, so a translate completion and a
/// summarize completion arriving in either order both survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub detected_language: Option<DetectedLanguage>,
    pub translation: Option<TranslationSlot>,
    pub summary: Option<SummarySlot>,
}

impl RecordPatch {
    pub fn detected_language(language: DetectedLanguage) -> Self {
        Self {
            detected_language: Some(language),
            ..Self::default()
        }
    }

    pub fn translation(slot: TranslationSlot) -> Self {
        Self {
            translation: Some(slot),
            ..Self::default()
        }
    }

    pub fn summary(slot: SummarySlot) -> Self {
        Self {
            summary: Some(slot),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.detected_language.is_none() && self.translation.is_none() && self.summary.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
