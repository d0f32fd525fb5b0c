//! Append-only, observable message store.
//!
//! [`MessageStore`] is the session transcript.  It is cheap to clone (all
//! clones share one `Arc<Mutex<…>>`) and every mutation is broadcast as a
//! [`StoreEvent`] so a renderer can refresh without polling.
//!
//! Writes are serialized by the mutex and applied as field-level
//! [`RecordPatch`]es; the lock is never held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::broadcast;

use super::record::{DetectedLanguage, MessageId, MessageRecord, RecordPatch};

/// Capacity of the change-notification channel.  Slow subscribers observe
/// `RecvError::Lagged` and should re-read with [`MessageStore::list_all`].
const EVENT_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// StoreError / StoreEvent
// ---------------------------------------------------------------------------

/// Errors returned by [`MessageStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The submitted text was empty or whitespace only.
    #[error("cannot append empty text")]
    EmptyText,

    /// No record exists with this id.
    #[error("no message with id {0}")]
    UnknownRecord(MessageId),
}

/// Change notification carrying a snapshot of the affected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Appended(MessageRecord),
    Updated(MessageRecord),
}

impl StoreEvent {
    pub fn record(&self) -> &MessageRecord {
        match self {
            StoreEvent::Appended(rec) | StoreEvent::Updated(rec) => rec,
        }
    }
}

// ---------------------------------------------------------------------------
// MessageStore
// ---------------------------------------------------------------------------

/// Ordered, append-only sequence of [`MessageRecord`]s.
///
/// ```rust
/// use text_annotator::store::{MessageStore, RecordPatch, DetectedLanguage};
///
/// let store = MessageStore::new();
/// let id = store.append("Hola").unwrap();
/// store
///     .update(id, RecordPatch::detected_language(DetectedLanguage::Code("es".into())))
///     .unwrap();
/// assert_eq!(store.get(id).unwrap().detected_language.code(), Some("es"));
/// ```
#[derive(Clone)]
pub struct MessageStore {
    records: Arc<Mutex<Vec<MessageRecord>>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MessageStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            events,
        }
    }

    /// Subscribe to change notifications for every later mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Append a new `Pending` record and return its id.
    ///
    /// The text is stored as given; it is rejected only when it trims to
    /// nothing.
    pub fn append(&self, text: impl Into<String>) -> Result<MessageId, StoreError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }

        let record = {
            let mut records = self.lock();
            let id = MessageId(records.len());
            records.push(MessageRecord::new(id, text));
            records[id.0].clone()
        };

        log::debug!("store: appended {}", record.id);
        let id = record.id;
        self.notify(StoreEvent::Appended(record));
        Ok(id)
    }

    /// Snapshot of one record.
    pub fn get(&self, id: MessageId) -> Option<MessageRecord> {
        self.lock().get(id.0).cloned()
    }

    /// Apply a field-level patch and return the updated snapshot.
    ///
    /// `detected_language` is write-once: a patch that would change an
    /// already-resolved language (or move it back to `Pending`) has that
    /// field dropped.  The remaining fields are still applied.
    pub fn update(&self, id: MessageId, patch: RecordPatch) -> Result<MessageRecord, StoreError> {
        self.try_update(id, |_| Some(patch))?
            .ok_or(StoreError::UnknownRecord(id))
    }

    /// Atomically inspect a record and decide on a patch.
    ///
    /// `decide` runs under the store lock.  Returning `None` leaves the record
    /// untouched and yields `Ok(None)`; no event is emitted.  An empty patch
    /// returns the current snapshot, also without an event.  This is how the
    /// pipeline claims an operation (`NotRequested → InProgress`) without a
    /// second caller racing past the same check.
    pub fn try_update<F>(&self, id: MessageId, decide: F) -> Result<Option<MessageRecord>, StoreError>
    where
        F: FnOnce(&MessageRecord) -> Option<RecordPatch>,
    {
        let updated = {
            let mut records = self.lock();
            let record = records.get_mut(id.0).ok_or(StoreError::UnknownRecord(id))?;

            let Some(patch) = decide(record) else {
                return Ok(None);
            };
            if patch.is_empty() {
                return Ok(Some(record.clone()));
            }
            apply_patch(record, patch);
            record.clone()
        };

        self.notify(StoreEvent::Updated(updated.clone()));
        Ok(Some(updated))
    }

    /// Snapshot of every record in insertion order.
    pub fn list_all(&self) -> Vec<MessageRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, Vec<MessageRecord>> {
        // A panic while holding the lock cannot leave a record half-patched
        // (patches are plain field assignments), so a poisoned lock is safe
        // to keep using.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_patch(record: &mut MessageRecord, patch: RecordPatch) {
    if let Some(language) = patch.detected_language {
        if record.detected_language.is_resolved() {
            log::warn!(
                "store: {} already detected as {}; ignoring {}",
                record.id,
                record.detected_language.label(),
                language.label()
            );
        } else if language != DetectedLanguage::Pending {
            record.detected_language = language;
        }
    }
    if let Some(translation) = patch.translation {
        record.translation = translation;
    }
    if let Some(summary) = patch.summary {
        record.summary = summary;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
