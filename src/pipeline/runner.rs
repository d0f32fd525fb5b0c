//! Annotation pipeline — runs detect / translate / summarize on stored records.
//!
//! [`AnnotationPipeline`] owns a handle to the [`MessageStore`], the
//! session-wide [`CapabilityProvider`] and the [`PipelineConfig`] rules.
//!
//! # Operation flow
//!
//! ```text
//! submit(text)
//!   └─▶ store.append            [Pending]
//!         └─▶ detect            [Unknown | code]
//!
//! translate(id, target)
//!   └─▶ claim slot              [InProgress{target}]   (or Failed if target unsupported)
//!         └─▶ capabilities_for  No → [Failed{LanguagePairUnsupported}]
//!               └─▶ translate   Ok → [Done{target, text}]   Err → [Failed{reason}]
//!                               (dropped if another target claimed the slot meanwhile)
//!
//! summarize(id)
//!   └─▶ claim slot              [InProgress]            (single-shot)
//!         └─▶ summarize         Ok → [Done(text)]       Err → [Failed(reason)]
//! ```
//!
//! Claims go through [`MessageStore::try_update`], so the precondition check
//! and the `InProgress` write are one atomic step.  Completions are written as
//! field-level patches and never disturb the record's other slots.

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::language::{self, UNDETERMINED};
use crate::provider::{Availability, CapabilityProvider};
use crate::store::{
    DetectedLanguage, FailureReason, MessageId, MessageRecord, MessageStore, RecordPatch,
    SummarySlot, Translation, TranslationSlot,
};

use super::state::{Operation, Outcome, SkipReason};

// ---------------------------------------------------------------------------
// AnnotationPipeline
// ---------------------------------------------------------------------------

/// Orchestrates enrichment steps for the records of one session.
///
/// Cheap to clone; clones share the store and provider, so operations can be
/// spawned as independent tokio tasks.
///
/// ```rust,no_run
/// use text_annotator::config::AppConfig;
/// use text_annotator::pipeline::AnnotationPipeline;
/// use text_annotator::provider::build_provider;
/// use text_annotator::store::MessageStore;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let pipeline = AnnotationPipeline::new(
///     MessageStore::new(),
///     build_provider(&config.provider),
///     config.pipeline.clone(),
/// );
///
/// if let Some(id) = pipeline.submit("Hola").await {
///     pipeline.translate(id, "en").await;
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct AnnotationPipeline {
    store: MessageStore,
    provider: Arc<dyn CapabilityProvider>,
    config: Arc<PipelineConfig>,
}

impl AnnotationPipeline {
    pub fn new(
        store: MessageStore,
        provider: Arc<dyn CapabilityProvider>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            provider,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Submit / detect
    // -----------------------------------------------------------------------

    /// Append `text` as a new record and run detection on it.
    ///
    /// Returns `None` (nothing appended, provider not called) when `text` is
    /// empty or whitespace only.
    pub async fn submit(&self, text: &str) -> Option<MessageId> {
        let id = match self.store.append(text) {
            Ok(id) => id,
            Err(e) => {
                log::debug!("pipeline: submit ignored: {e}");
                return None;
            }
        };

        self.detect(id).await;
        Some(id)
    }

    /// Resolve the record's language.  Provider failures resolve to
    /// `Unknown`; they are logged, never returned.
    pub async fn detect(&self, id: MessageId) -> Outcome {
        let Some(record) = self.store.get(id) else {
            return skip(Operation::Detect, id, SkipReason::UnknownRecord);
        };
        if record.text.trim().is_empty() {
            return skip(Operation::Detect, id, SkipReason::EmptyText);
        }
        if record.detected_language.is_resolved() {
            return skip(Operation::Detect, id, SkipReason::AlreadyDetected);
        }

        let (language, outcome) = match self.provider.detect(&record.text).await {
            Ok(Some(answer)) => {
                let code = language::normalize(&answer).filter(|c| language::is_known(c));
                if code.is_none() {
                    log::debug!("pipeline: {id} provider answered {answer:?}, not a language code");
                }
                let language = code.map_or(DetectedLanguage::Unknown, DetectedLanguage::Code);
                (language, Outcome::Done)
            }
            Ok(None) => (DetectedLanguage::Unknown, Outcome::Done),
            Err(e) => {
                log::warn!("pipeline: language detection failed for {id}: {e}");
                let reason = Operation::Detect.classify(&e);
                (DetectedLanguage::Unknown, Outcome::Failed(reason))
            }
        };

        log::info!("pipeline: {id} detected as {}", language.label());
        self.write(id, RecordPatch::detected_language(language));
        outcome
    }

    // -----------------------------------------------------------------------
    // Translate
    // -----------------------------------------------------------------------

    /// Translate the record into `target`, replacing any earlier translation.
    ///
    /// A target outside the configured set fails immediately with
    /// [`FailureReason::LanguagePairUnsupported`] without calling the provider.
    pub async fn translate(&self, id: MessageId, target: &str) -> Outcome {
        let target = target.trim().to_ascii_lowercase();
        let supported = self.config.supports_target(&target);

        let claimed = self.store.try_update(id, |rec| {
            if !rec.detected_language.is_resolved() {
                return None;
            }
            let slot = if supported {
                TranslationSlot::InProgress {
                    target: target.clone(),
                }
            } else {
                TranslationSlot::Failed {
                    target: target.clone(),
                    reason: FailureReason::LanguagePairUnsupported,
                }
            };
            Some(RecordPatch::translation(slot))
        });

        let record = match claimed {
            Ok(Some(record)) => record,
            Ok(None) => return skip(Operation::Translate, id, SkipReason::DetectionPending),
            Err(_) => return skip(Operation::Translate, id, SkipReason::UnknownRecord),
        };

        if !supported {
            log::warn!("pipeline: {id} translation target '{target}' is not supported");
            return Outcome::Failed(FailureReason::LanguagePairUnsupported);
        }

        let result = self.run_translation(&record, &target).await;
        self.finish_translation(id, target, result)
    }

    async fn run_translation(
        &self,
        record: &MessageRecord,
        target: &str,
    ) -> Result<String, FailureReason> {
        let source = record.detected_language.code().unwrap_or(UNDETERMINED);

        match self.provider.capabilities_for(source, target).await {
            Ok(Availability::No) => {
                log::warn!(
                    "pipeline: {} pair {source} → {target} unsupported by provider",
                    record.id
                );
                return Err(FailureReason::LanguagePairUnsupported);
            }
            Ok(Availability::AfterDownload) => {
                log::info!("pipeline: {source} → {target} needs a model download first");
            }
            Ok(Availability::Readily) => {}
            Err(e) => {
                log::warn!("pipeline: capability check failed for {}: {e}", record.id);
                return Err(Operation::Translate.classify(&e));
            }
        }

        self.provider
            .translate(&record.text, source, target)
            .await
            .map_err(|e| {
                log::warn!("pipeline: translation failed for {}: {e}", record.id);
                Operation::Translate.classify(&e)
            })
    }

    /// Write a translation result unless a request for a different target
    /// has claimed the slot since this one started.
    fn finish_translation(
        &self,
        id: MessageId,
        target: String,
        result: Result<String, FailureReason>,
    ) -> Outcome {
        let (slot, outcome) = match result {
            Ok(text) => (
                TranslationSlot::Done(Translation {
                    target: target.clone(),
                    text,
                }),
                Outcome::Done,
            ),
            Err(reason) => (
                TranslationSlot::Failed {
                    target: target.clone(),
                    reason,
                },
                Outcome::Failed(reason),
            ),
        };

        let written = self.store.try_update(id, |rec| {
            (rec.translation.target() == Some(target.as_str()))
                .then(|| RecordPatch::translation(slot))
        });
        match written {
            Ok(Some(_)) => outcome,
            Ok(None) => skip(Operation::Translate, id, SkipReason::Superseded),
            Err(e) => {
                log::error!("pipeline: could not write result: {e}");
                outcome
            }
        }
    }

    // -----------------------------------------------------------------------
    // Summarize
    // -----------------------------------------------------------------------

    /// Summarize the record once.  Repeat requests (after success, failure or
    /// while in flight) are no-ops until [`reset_summary`](Self::reset_summary).
    pub async fn summarize(&self, id: MessageId) -> Outcome {
        let mut skipped = None;
        let claimed = self.store.try_update(id, |rec| match self.summary_precondition(rec) {
            Ok(()) => Some(RecordPatch::summary(SummarySlot::InProgress)),
            Err(reason) => {
                skipped = Some(reason);
                None
            }
        });

        let record = match claimed {
            Ok(Some(record)) => record,
            Ok(None) => {
                let reason = skipped.unwrap_or(SkipReason::AlreadySummarized);
                return skip(Operation::Summarize, id, reason);
            }
            Err(_) => return skip(Operation::Summarize, id, SkipReason::UnknownRecord),
        };

        let (slot, outcome) = match self.provider.summarize(&record.text).await {
            Ok(text) => (SummarySlot::Done(text), Outcome::Done),
            Err(e) => {
                log::warn!("pipeline: summarization failed for {id}: {e}");
                let reason = Operation::Summarize.classify(&e);
                (SummarySlot::Failed(reason), Outcome::Failed(reason))
            }
        };
        self.write(id, RecordPatch::summary(slot));
        outcome
    }

    /// Return a settled summary (done or failed) to `NotRequested` so it can
    /// be requested again.  Returns `false` when there was nothing to reset or
    /// a summary is still in flight.
    pub fn reset_summary(&self, id: MessageId) -> bool {
        let reset = self.store.try_update(id, |rec| match rec.summary {
            SummarySlot::Done(_) | SummarySlot::Failed(_) => {
                Some(RecordPatch::summary(SummarySlot::NotRequested))
            }
            SummarySlot::NotRequested | SummarySlot::InProgress => None,
        });
        matches!(reset, Ok(Some(_)))
    }

    /// `Ok(())` when `record` may be summarized right now.
    pub fn summary_precondition(&self, record: &MessageRecord) -> Result<(), SkipReason> {
        if !record.detected_language.is_resolved() {
            return Err(SkipReason::DetectionPending);
        }
        if record.char_len() <= self.config.summary_threshold {
            return Err(SkipReason::TextTooShort);
        }
        if !self
            .config
            .summarizes_language(record.detected_language.code())
        {
            return Err(SkipReason::LanguageNotSummarizable);
        }
        if record.summary != SummarySlot::NotRequested {
            return Err(SkipReason::AlreadySummarized);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn write(&self, id: MessageId, patch: RecordPatch) {
        // Records are never removed, so this only fails for an id that was
        // never issued.
        if let Err(e) = self.store.update(id, patch) {
            log::error!("pipeline: could not write result: {e}");
        }
    }
}

fn skip(op: Operation, id: MessageId, reason: SkipReason) -> Outcome {
    log::debug!("pipeline: {} {id} skipped: {}", op.label(), reason.label());
    Outcome::Skipped(reason)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
