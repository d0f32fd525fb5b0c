//! Capability providers for the annotation pipeline.
//!
//! This module provides:
//! * [`CapabilityProvider`] — async trait implemented by every backend.
//! * [`HttpProvider`] — OpenAI-compatible REST backend (detect, translate,
//!   summarize).
//! * [`LocalProvider`] — offline statistical language detection.
//! * [`UnavailableProvider`] — fails every call; used when disabled.
//! * [`ReadyProvider`] — awaits a provider's one-time readiness step.
//! * [`PromptBuilder`] — chat prompts for the HTTP backend.
//! * [`ProviderError`] / [`Availability`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use text_annotator::config::AppConfig;
//! use text_annotator::provider::build_provider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let provider = build_provider(&config.provider);
//!
//!     let code = provider.detect("Hola, ¿qué tal?").await.ok().flatten();
//!     println!("{code:?}");
//! }
//! ```

pub mod capability;
pub mod http;
pub mod local;
pub mod prompt;
pub mod ready;

use std::sync::Arc;

use crate::config::{ProviderConfig, ProviderKind};

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use capability::{Availability, CapabilityProvider, ProviderError};
pub use http::HttpProvider;
pub use local::{LocalProvider, UnavailableProvider};
pub use prompt::PromptBuilder;
pub use ready::ReadyProvider;

/// Build the session-wide provider selected by `config.kind`, wrapped in a
/// [`ReadyProvider`] so readiness is awaited before the first call.
pub fn build_provider(config: &ProviderConfig) -> Arc<dyn CapabilityProvider> {
    match config.kind {
        ProviderKind::Http => {
            log::info!(
                "provider: HTTP endpoint {} (model {})",
                config.base_url,
                config.model
            );
            Arc::new(ReadyProvider::new(HttpProvider::from_config(config)))
        }
        ProviderKind::Local => {
            log::info!("provider: offline language detection only");
            Arc::new(ReadyProvider::new(LocalProvider::new()))
        }
        ProviderKind::Disabled => {
            log::warn!("provider: disabled; every annotation will degrade");
            Arc::new(ReadyProvider::new(UnavailableProvider::new(
                "provider disabled in settings",
            )))
        }
    }
}
