//! Core `CapabilityProvider` trait and its error type.
//!
//! A provider supplies the three enrichment capabilities (detect, translate,
//! summarize) plus a language-pair availability check.  Providers may need an
//! asynchronous warm-up (model download, connection check) before first use;
//! that is [`CapabilityProvider::ready`], awaited once by
//! [`ReadyProvider`](crate::provider::ReadyProvider).

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Errors a capability provider can report.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The capability does not exist here or never became ready.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// The provider cannot handle this input (language pair, language).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// HTTP transport or connection error.
    #[error("request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("provider request timed out")]
    Timeout,

    /// The response could not be parsed as expected.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The provider answered with no usable content.
    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Answer to "can you translate from `source` to `target`?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The pair is not supported.
    No,
    /// The pair can be used right away.
    Readily,
    /// The pair is supported but the provider must fetch a model first; the
    /// translate call itself waits for it.
    AfterDownload,
}

// ---------------------------------------------------------------------------
// CapabilityProvider trait
// ---------------------------------------------------------------------------

/// Async trait for detect / translate / summarize backends.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn CapabilityProvider>`).
///
/// Language arguments are ISO-639-1 codes; an undetected source language is
/// passed as [`UNDETERMINED`](crate::language::UNDETERMINED).
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// One-time warm-up before the first real call.
    async fn ready(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Detect the language of `text`; `Ok(None)` when inconclusive.
    async fn detect(&self, text: &str) -> Result<Option<String>, ProviderError>;

    /// Report whether `source → target` translation is available.
    async fn capabilities_for(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Availability, ProviderError>;

    /// Translate `text` from `source` into `target`.
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, ProviderError>;

    /// Summarize `text`.
    async fn summarize(&self, text: &str) -> Result<String, ProviderError>;
}
