//! Session transcript: message records and the store that holds them.
//!
//! * [`MessageRecord`] — one submitted text plus its enrichment slots.
//! * [`RecordPatch`] — field-level update applied atomically by the store.
//! * [`MessageStore`] — append-only, observable, cheap-to-clone container.

pub mod message_store;
pub mod record;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use message_store::{MessageStore, StoreError, StoreEvent};
pub use record::{
    DetectedLanguage, FailureReason, MessageId, MessageRecord, OperationStatus, RecordPatch,
    SummarySlot, Translation, TranslationSlot,
};
