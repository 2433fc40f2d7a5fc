//! Sequential fallback resolver.
//!
//! Walks the strategy chain strictly in order and short-circuits on the
//! first candidate with a usable media URL. Per-strategy failures are
//! logged and absorbed — only total exhaustion is reported, and each
//! attempt runs under a bounded timeout so one slow upstream cannot stall
//! the whole chain.

use crate::config;
use crate::error::ResolveError;
use crate::resolve::embed::EmbedStrategy;
use crate::resolve::graphql::GraphQlStrategy;
use crate::resolve::page::PageStrategy;
use crate::resolve::strategy::Strategy;
use crate::resolve::MediaCandidate;
use std::time::Duration;

/// Default upstream host for the production strategy chain.
pub const INSTAGRAM_BASE: &str = "https://www.instagram.com";

pub struct Resolver {
    client: reqwest::Client,
    strategies: Vec<Box<dyn Strategy>>,
    strategy_timeout: Duration,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Resolver with the canonical strategy chain against instagram.com.
    pub fn new() -> Self {
        Self::with_base_url(INSTAGRAM_BASE)
    }

    /// Canonical strategy chain against an arbitrary base URL.
    /// Tests point this at a local mock server.
    pub fn with_base_url(base: &str) -> Self {
        Self::with_strategies(vec![
            Box::new(GraphQlStrategy::new(base)),
            Box::new(EmbedStrategy::new(base)),
            Box::new(PageStrategy::new(base)),
        ])
    }

    /// Resolver over an explicit strategy list (highest priority first).
    // expect: the builder only fails for invalid TLS/proxy settings and
    // none are configured here.
    #[allow(clippy::expect_used)]
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config::USER_AGENT)
            .timeout(config::network::request_timeout())
            .connect_timeout(config::network::connect_timeout())
            .build()
            .expect("resolver HTTP client build should succeed");

        Self {
            client,
            strategies,
            strategy_timeout: config::network::strategy_timeout(),
        }
    }

    /// Override the per-strategy timeout (used by tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.strategy_timeout = timeout;
        self
    }

    /// Try each strategy in order until one yields a usable media URL.
    ///
    /// # Errors
    /// Returns `ResolveError::ResolutionFailed` once every strategy has
    /// been exhausted.
    pub async fn resolve(&self, shortcode: &str) -> Result<MediaCandidate, ResolveError> {
        for strategy in &self.strategies {
            match tokio::time::timeout(self.strategy_timeout, strategy.resolve(&self.client, shortcode)).await {
                Ok(Ok(candidate)) if candidate.download_url().is_some() => {
                    log::info!(
                        "Resolver: strategy '{}' resolved media for {} (video={})",
                        strategy.name(),
                        shortcode,
                        candidate.has_video()
                    );
                    return Ok(candidate);
                }
                Ok(Ok(_)) => {
                    log::warn!(
                        "Resolver: strategy '{}' returned a candidate without a usable URL for {}",
                        strategy.name(),
                        shortcode
                    );
                }
                Ok(Err(e)) => {
                    log::warn!("Resolver: strategy '{}' failed for {}: {}", strategy.name(), shortcode, e);
                }
                Err(_) => {
                    log::warn!(
                        "Resolver: strategy '{}' timed out after {:?} for {}",
                        strategy.name(),
                        self.strategy_timeout,
                        shortcode
                    );
                }
            }
        }

        log::warn!("Resolver: all {} strategies exhausted for {}", self.strategies.len(), shortcode);
        Err(ResolveError::ResolutionFailed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::resolve::strategy::StrategyError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted strategy that counts how often it was invoked.
    struct Scripted {
        name: &'static str,
        calls: Arc<AtomicUsize>,
        outcome: Outcome,
    }

    enum Outcome {
        Video(&'static str),
        Empty,
        Fail,
        Hang,
    }

    impl Scripted {
        fn new(name: &'static str, outcome: Outcome) -> (Box<dyn Strategy>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let strategy = Box::new(Self {
                name,
                calls: Arc::clone(&calls),
                outcome,
            });
            (strategy, calls)
        }
    }

    #[async_trait]
    impl Strategy for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn resolve(&self, _client: &reqwest::Client, _shortcode: &str) -> Result<MediaCandidate, StrategyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Video(url) => Ok(MediaCandidate {
                    video_url: Some(url.to_string()),
                    display_url: None,
                    is_video: true,
                }),
                Outcome::Empty => Ok(MediaCandidate::default()),
                Outcome::Fail => Err(StrategyError::NoMedia),
                Outcome::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Err(StrategyError::NoMedia)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_first_success_short_circuits_the_rest() {
        let (first, first_calls) = Scripted::new("one", Outcome::Video("https://cdn/x.mp4"));
        let (second, second_calls) = Scripted::new("two", Outcome::Video("https://cdn/other.mp4"));
        let resolver = Resolver::with_strategies(vec![first, second]);

        let candidate = resolver.resolve("ABC123xyz").await.unwrap();
        assert_eq!(candidate.download_url(), Some("https://cdn/x.mp4"));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_falls_through_to_next_strategy() {
        let (first, _) = Scripted::new("one", Outcome::Fail);
        let (second, _) = Scripted::new("two", Outcome::Empty);
        let (third, third_calls) = Scripted::new("three", Outcome::Video("https://cdn/x.mp4"));
        let resolver = Resolver::with_strategies(vec![first, second, third]);

        let candidate = resolver.resolve("ABC123xyz").await.unwrap();
        assert_eq!(candidate.download_url(), Some("https://cdn/x.mp4"));
        assert_eq!(third_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_resolution_failed() {
        let (first, first_calls) = Scripted::new("one", Outcome::Fail);
        let (second, second_calls) = Scripted::new("two", Outcome::Fail);
        let resolver = Resolver::with_strategies(vec![first, second]);

        let err = resolver.resolve("ABC123xyz").await.unwrap_err();
        assert!(matches!(err, ResolveError::ResolutionFailed));
        assert!(!err.to_string().is_empty());
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hung_strategy_is_timed_out_and_skipped() {
        let (first, _) = Scripted::new("one", Outcome::Hang);
        let (second, _) = Scripted::new("two", Outcome::Video("https://cdn/x.mp4"));
        let resolver = Resolver::with_strategies(vec![first, second]).with_timeout(Duration::from_millis(50));

        let candidate = resolver.resolve("ABC123xyz").await.unwrap();
        assert_eq!(candidate.download_url(), Some("https://cdn/x.mp4"));
    }

    #[tokio::test]
    async fn test_empty_chain_is_exhaustion() {
        let resolver = Resolver::with_strategies(vec![]);
        assert!(matches!(
            resolver.resolve("ABC123xyz").await,
            Err(ResolveError::ResolutionFailed)
        ));
    }
}
