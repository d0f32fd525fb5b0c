//! Interactive session driver.
//!
//! A [`Session`] turns parsed [`Command`]s into pipeline requests.  Each
//! detect / translate / summarize request runs as its own task in a
//! [`JoinSet`] so a slow provider never blocks the prompt, and
//! [`Session::finish`] waits for every request still running before the
//! session ends.
//!
//! The transcript is printed by a separate task fed from the store's event
//! channel (see [`spawn_transcript`]).  The receiver is created by the caller
//! before any request is issued, so no change is missed.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::{JoinHandle, JoinSet};

use crate::command::{Command, HELP};
use crate::language;
use crate::pipeline::{AnnotationPipeline, Outcome};
use crate::render::render_record;
use crate::store::StoreEvent;

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Render every record change from `events` and hand it to `emit`.
///
/// The task ends once every store handle has been dropped and the buffered
/// events are drained.
pub fn spawn_transcript<F>(mut events: broadcast::Receiver<StoreEvent>, mut emit: F) -> JoinHandle<()>
where
    F: FnMut(String) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => emit(render_record(event.record())),
                Err(RecvError::Lagged(missed)) => {
                    log::warn!("transcript: skipped {missed} updates");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    pipeline: AnnotationPipeline,
    tasks: JoinSet<()>,
}

impl Session {
    pub fn new(pipeline: AnnotationPipeline) -> Self {
        Self {
            pipeline,
            tasks: JoinSet::new(),
        }
    }

    pub fn pipeline(&self) -> &AnnotationPipeline {
        &self.pipeline
    }

    /// Requests started but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Handle one command.  Returns `false` when the session should end.
    pub fn handle(&mut self, command: Command) -> bool {
        self.reap();

        match command {
            Command::Submit(text) => {
                let pipeline = self.pipeline.clone();
                self.tasks.spawn(async move {
                    pipeline.submit(&text).await;
                });
            }
            Command::Translate { id, target } => {
                let target =
                    target.unwrap_or_else(|| self.pipeline.config().default_target.clone());
                let pipeline = self.pipeline.clone();
                self.tasks.spawn(async move {
                    report("translation", pipeline.translate(id, &target).await);
                });
            }
            Command::Summarize(id) => {
                let pipeline = self.pipeline.clone();
                self.tasks.spawn(async move {
                    report("summary", pipeline.summarize(id).await);
                });
            }
            Command::ResetSummary(id) => {
                if !self.pipeline.reset_summary(id) {
                    println!("  (nothing to reset for {id})");
                }
            }
            Command::List => {
                let records = self.pipeline.store().list_all();
                if records.is_empty() {
                    println!("  (no messages yet)");
                }
                for record in records {
                    println!("{}", render_record(&record));
                }
            }
            Command::Languages => {
                for code in &self.pipeline.config().supported_targets {
                    println!("  {code}  {}", language::display_name(code));
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Invalid(message) => println!("  {message}"),
            Command::Empty => {}
            Command::Quit => return false,
        }
        true
    }

    /// Wait until every request issued so far has completed.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            log_join_error(joined);
        }
    }

    /// Wait for outstanding requests, then end the session.  Returns the
    /// number of messages in the transcript.
    pub async fn finish(mut self) -> usize {
        if !self.tasks.is_empty() {
            log::info!("session: waiting for {} running requests", self.tasks.len());
        }
        self.settle().await;
        self.pipeline.store().len()
    }

    /// Drop the handles of requests that already completed.
    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            log_join_error(joined);
        }
    }
}

/// Report an outcome the transcript will not show on its own.
fn report(what: &str, outcome: Outcome) {
    match outcome {
        Outcome::Skipped(reason) => println!("  ({what} skipped: {})", reason.label()),
        outcome if outcome.is_done() => log::debug!("session: {what} done"),
        _ => {}
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        log::error!("session: request task failed: {e}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::provider::{Availability, CapabilityProvider, ProviderError};
    use crate::store::{MessageId, MessageStore};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Answers after a short delay, like a remote provider would.
    struct SlowProvider;

    #[async_trait]
    impl CapabilityProvider for SlowProvider {
        async fn detect(&self, _text: &str) -> Result<Option<String>, ProviderError> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(Some("es".into()))
        }

        async fn capabilities_for(&self, _: &str, _: &str) -> Result<Availability, ProviderError> {
            Ok(Availability::Readily)
        }

        async fn translate(&self, text: &str, _: &str, target: &str) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(format!("[{target}] {text}"))
        }

        async fn summarize(&self, _text: &str) -> Result<String, ProviderError> {
            Ok("summary".into())
        }
    }

    fn make_session() -> Session {
        let pipeline = AnnotationPipeline::new(
            MessageStore::new(),
            Arc::new(SlowProvider),
            PipelineConfig::default(),
        );
        Session::new(pipeline)
    }

    #[tokio::test]
    async fn finish_waits_for_running_requests() {
        let mut session = make_session();
        let store = session.pipeline().store().clone();

        assert!(session.handle(Command::Submit("Hola amigos".into())));
        assert_eq!(session.in_flight(), 1);

        assert_eq!(session.finish().await, 1);
        let record = store.get(MessageId(0)).expect("submitted record");
        assert_eq!(record.detected_language.code(), Some("es"));
    }

    #[tokio::test]
    async fn translate_without_target_uses_default() {
        let mut session = make_session();
        session.handle(Command::Submit("Hola".into()));
        session.settle().await;

        session.handle(Command::Translate {
            id: MessageId(0),
            target: None,
        });
        session.settle().await;

        let record = session.pipeline().store().get(MessageId(0)).unwrap();
        assert_eq!(record.translation.translation().unwrap().text, "[en] Hola");
    }

    #[tokio::test]
    async fn transcript_sees_every_change() {
        let session = make_session();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let printer = spawn_transcript(session.pipeline().store().subscribe(), {
            let lines = Arc::clone(&lines);
            move |text| lines.lock().unwrap().push(text)
        });

        let mut session = session;
        session.handle(Command::Submit("Hola".into()));
        session.finish().await;
        printer.await.unwrap();

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "#0 Hola\n    Detecting language…");
        assert_eq!(lines[1], "#0 Hola\n    Detected Language: es (Spanish)");
    }

    #[tokio::test]
    async fn quit_ends_session() {
        let mut session = make_session();
        assert!(session.handle(Command::Help));
        assert!(session.handle(Command::Empty));
        assert!(!session.handle(Command::Quit));
        assert_eq!(session.in_flight(), 0);
    }
}
