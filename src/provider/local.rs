//! Offline providers: statistical detection and the "no provider" stub.
//!
//! * [`LocalProvider`] detects languages in-process with `whatlang`; it has
//!   no translation or summarization model, so those report unsupported.
//! * [`UnavailableProvider`] fails every call.  It stands in when the
//!   provider is disabled in configuration so the pipeline still runs and
//!   every record degrades to its failure marker.

use async_trait::async_trait;

use crate::language;
use crate::provider::capability::{Availability, CapabilityProvider, ProviderError};

// ---------------------------------------------------------------------------
// LocalProvider
// ---------------------------------------------------------------------------

/// In-process language detection; nothing else.
#[derive(Debug, Clone, Default)]
pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }
}

/// Detect `text` with whatlang and map the ISO-639-3 answer to ISO-639-1.
fn detect_blocking(text: &str) -> Option<String> {
    let info = whatlang::detect(text)?;
    if !info.is_reliable() {
        log::debug!(
            "local: low-confidence detection {} ({:.2})",
            info.lang().code(),
            info.confidence()
        );
    }
    language::from_639_3(info.lang().code()).map(str::to_string)
}

#[async_trait]
impl CapabilityProvider for LocalProvider {
    async fn detect(&self, text: &str) -> Result<Option<String>, ProviderError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || detect_blocking(&text))
            .await
            .map_err(|e| ProviderError::Unavailable(format!("detector task failed: {e}")))
    }

    async fn capabilities_for(
        &self,
        _source: &str,
        _target: &str,
    ) -> Result<Availability, ProviderError> {
        Ok(Availability::No)
    }

    async fn translate(
        &self,
        _text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Unsupported(format!(
            "no offline model for {source} → {target}"
        )))
    }

    async fn summarize(&self, _text: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable(
            "summarization requires a remote provider".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// UnavailableProvider
// ---------------------------------------------------------------------------

/// Provider used when none is configured; every call fails.
#[derive(Debug, Clone)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err(&self) -> ProviderError {
        ProviderError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl CapabilityProvider for UnavailableProvider {
    async fn ready(&self) -> Result<(), ProviderError> {
        Err(self.err())
    }

    async fn detect(&self, _text: &str) -> Result<Option<String>, ProviderError> {
        Err(self.err())
    }

    async fn capabilities_for(
        &self,
        _source: &str,
        _target: &str,
    ) -> Result<Availability, ProviderError> {
        Err(self.err())
    }

    async fn translate(
        &self,
        _text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, ProviderError> {
        Err(self.err())
    }

    async fn summarize(&self, _text: &str) -> Result<String, ProviderError> {
        Err(self.err())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
