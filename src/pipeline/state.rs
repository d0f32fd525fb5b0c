//! Outcomes of pipeline operations.
//!
//! Pipeline operations never return errors: whatever happens is either
//! written to the record (as a `Done` or `Failed` slot) or, when a
//! precondition does not hold, reported as [`Outcome::Skipped`] with the
//! record left untouched.

use crate::provider::ProviderError;
use crate::store::FailureReason;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// The three enrichment operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Detect,
    Translate,
    Summarize,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Detect => "detect",
            Operation::Translate => "translate",
            Operation::Summarize => "summarize",
        }
    }

    /// Map a provider error onto the record-level failure taxonomy.
    ///
    /// `Unsupported` only means a language-pair problem for translation;
    /// for the other operations the capability is simply missing.
    pub fn classify(&self, err: &ProviderError) -> FailureReason {
        match err {
            ProviderError::Unavailable(_) => FailureReason::ProviderUnavailable,
            ProviderError::Unsupported(_) => match self {
                Operation::Translate => FailureReason::LanguagePairUnsupported,
                Operation::Detect | Operation::Summarize => FailureReason::ProviderUnavailable,
            },
            ProviderError::Request(_)
            | ProviderError::Timeout
            | ProviderError::Parse(_)
            | ProviderError::EmptyResponse => FailureReason::RequestFailed,
        }
    }
}

// ---------------------------------------------------------------------------
// SkipReason
// ---------------------------------------------------------------------------

/// Why an operation was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Text is empty or whitespace only.
    EmptyText,
    /// No record with the given id.
    UnknownRecord,
    /// Detection already settled for this record.
    AlreadyDetected,
    /// Detection has not settled yet.
    DetectionPending,
    /// Text is not longer than the summary threshold.
    TextTooShort,
    /// Detected language is not the configured summarizable language.
    LanguageNotSummarizable,
    /// A summary was already requested for this record.
    AlreadySummarized,
    /// A translation to another target was requested while this one ran.
    Superseded,
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::EmptyText => "text is empty",
            SkipReason::UnknownRecord => "no such message",
            SkipReason::AlreadyDetected => "language already detected",
            SkipReason::DetectionPending => "language detection still pending",
            SkipReason::TextTooShort => "text too short to summarize",
            SkipReason::LanguageNotSummarizable => "language not summarizable",
            SkipReason::AlreadySummarized => "summary already requested",
            SkipReason::Superseded => "replaced by a newer translation request",
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one pipeline operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran and its result was written to the record.
    Done,
    /// The operation ran and its failure marker was written to the record.
    Failed(FailureReason),
    /// A precondition did not hold; nothing changed.
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
