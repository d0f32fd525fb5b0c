//! Annotation pipeline for the text annotator.
//!
//! This module drives the enrichment steps that run on every stored message
//! and reports what each request did.
//!
//! # Architecture
//!
//! ```text
//! front end (REPL command)
//!        │
//!        ▼
//! AnnotationPipeline            ← cloned into one tokio task per request
//!        │
//!        ├─ submit     → store.append → detect
//!        ├─ translate  → claim slot → capabilities_for → translate
//!        ├─ summarize  → claim slot → summarize
//!        └─ reset_summary
//!
//! MessageStore (Arc<Mutex<Vec<MessageRecord>>>) ──broadcast──▶ subscribers
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use text_annotator::config::AppConfig;
//! use text_annotator::pipeline::{AnnotationPipeline, Outcome};
//! use text_annotator::provider::build_provider;
//! use text_annotator::store::MessageStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let store = MessageStore::new();
//!     let mut events = store.subscribe();
//!
//!     let pipeline = AnnotationPipeline::new(
//!         store,
//!         build_provider(&config.provider),
//!         config.pipeline.clone(),
//!     );
//!
//!     let id = pipeline.submit("Hello there").await.unwrap();
//!     if let Outcome::Failed(reason) = pipeline.translate(id, "es").await {
//!         eprintln!("translation failed: {}", reason.label());
//!     }
//!
//!     while let Ok(event) = events.try_recv() {
//!         println!("{:?}", event.record());
//!     }
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::AnnotationPipeline;
pub use state::{Operation, Outcome, SkipReason};
