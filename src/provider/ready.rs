//! Readiness gate — wraps any [`CapabilityProvider`] and awaits its
//! [`ready`](CapabilityProvider::ready) step once before the first call.
//!
//! Concurrent first calls share a single readiness attempt.  If that attempt
//! fails, the call in hand fails with [`ProviderError::Unavailable`] and the
//! next call tries again; once readiness succeeds it is never re-run.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::provider::capability::{Availability, CapabilityProvider, ProviderError};

// ---------------------------------------------------------------------------
// ReadyProvider
// ---------------------------------------------------------------------------

/// A transparent wrapper that makes sure the inner provider is ready.
///
/// # Example
/// ```rust
/// use text_annotator::provider::{LocalProvider, ReadyProvider};
///
/// let provider = ReadyProvider::new(LocalProvider::new());
/// assert!(!provider.is_ready());
/// ```
pub struct ReadyProvider<P: CapabilityProvider> {
    inner: P,
    ready: OnceCell<()>,
}

impl<P: CapabilityProvider> ReadyProvider<P> {
    /// Wrap `inner`; readiness is awaited lazily on first use.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            ready: OnceCell::new(),
        }
    }

    /// `true` once a readiness attempt has succeeded.
    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    async fn ensure_ready(&self) -> Result<(), ProviderError> {
        self.ready
            .get_or_try_init(|| async {
                log::info!("provider: waiting for readiness");
                self.inner.ready().await.map_err(|e| match e {
                    ProviderError::Unavailable(_) => e,
                    other => ProviderError::Unavailable(format!("provider not ready: {other}")),
                })?;
                log::info!("provider: ready");
                Ok::<(), ProviderError>(())
            })
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl<P: CapabilityProvider> CapabilityProvider for ReadyProvider<P> {
    async fn ready(&self) -> Result<(), ProviderError> {
        self.ensure_ready().await
    }

    async fn detect(&self, text: &str) -> Result<Option<String>, ProviderError> {
        self.ensure_ready().await?;
        self.inner.detect(text).await
    }

    async fn capabilities_for(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Availability, ProviderError> {
        self.ensure_ready().await?;
        self.inner.capabilities_for(source, target).await
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        self.ensure_ready().await?;
        self.inner.translate(text, source, target).await
    }

    async fn summarize(&self, text: &str) -> Result<String, ProviderError> {
        self.ensure_ready().await?;
        self.inner.summarize(text).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Counts readiness attempts; fails the first `failures` of them.
    struct Warmup {
        attempts: AtomicUsize,
        failures: usize,
        detect_calls: AtomicUsize,
    }

    impl Warmup {
        fn new(failures: usize) -> Self {
            Self {
                attempts: AtomicUsize::new(0),
                failures,
                detect_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CapabilityProvider for Warmup {
        async fn ready(&self) -> Result<(), ProviderError> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if n < self.failures {
                Err(ProviderError::Timeout)
            } else {
                Ok(())
            }
        }

        async fn detect(&self, _text: &str) -> Result<Option<String>, ProviderError> {
            self.detect_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some("en".into()))
        }

        async fn capabilities_for(&self, _: &str, _: &str) -> Result<Availability, ProviderError> {
            Ok(Availability::AfterDownload)
        }

        async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, ProviderError> {
            Ok(text.to_uppercase())
        }

        async fn summarize(&self, _text: &str) -> Result<String, ProviderError> {
            Ok("summary".into())
        }
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn readiness_runs_once() {
        let provider = ReadyProvider::new(Warmup::new(0));

        provider.detect("a").await.unwrap();
        provider.translate("b", "en", "es").await.unwrap();
        provider.summarize("c").await.unwrap();

        assert!(provider.is_ready());
        assert_eq!(provider.inner.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_calls_share_one_attempt() {
        let provider = Arc::new(ReadyProvider::new(Warmup::new(0)));

        let (a, b) = tokio::join!(provider.detect("a"), provider.detect("b"));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(provider.inner.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(provider.inner.detect_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_readiness_is_unavailable_and_retried() {
        let provider = ReadyProvider::new(Warmup::new(1));

        let first = provider.detect("a").await;
        assert!(matches!(first, Err(ProviderError::Unavailable(_))));
        assert!(!provider.is_ready());
        assert_eq!(provider.inner.detect_calls.load(Ordering::SeqCst), 0);

        let second = provider.detect("a").await.unwrap();
        assert_eq!(second.as_deref(), Some("en"));
        assert_eq!(provider.inner.attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn ready_provider_is_object_safe() {
        let _: Box<dyn CapabilityProvider> = Box::new(ReadyProvider::new(Warmup::new(0)));
    }
}
