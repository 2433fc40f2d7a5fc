//! Embed strategy — scrapes the captioned embed page.
//!
//! `/p/<shortcode>/embed/captioned/` serves a lightweight page that inlines
//! the same GraphQL `shortcode_media` node in one of two script payloads:
//! `window.__additionalDataLoaded(...)` on current pages, or the legacy
//! `window._sharedData = {...};` blob.

use crate::resolve::strategy::{candidate_from_shortcode_media, Strategy, StrategyError};
use crate::resolve::MediaCandidate;
use async_trait::async_trait;
use lazy_regex::regex_captures;

pub struct EmbedStrategy {
    base: String,
}

impl EmbedStrategy {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Pull the `shortcode_media` node out of the embed page HTML.
    fn extract_media(html: &str) -> Option<serde_json::Value> {
        if let Some((_, payload)) = regex_captures!(r"window\.__additionalDataLoaded\([^,]+,(\{.+\})\);", html) {
            if let Ok(data) = serde_json::from_str::<serde_json::Value>(payload) {
                if let Some(media) = data.pointer("/graphql/shortcode_media") {
                    return Some(media.clone());
                }
            }
        }

        if let Some((_, payload)) = regex_captures!(r"window\._sharedData\s*=\s*(\{.+?\});", html) {
            if let Ok(data) = serde_json::from_str::<serde_json::Value>(payload) {
                if let Some(media) = data.pointer("/entry_data/PostPage/0/graphql/shortcode_media") {
                    return Some(media.clone());
                }
            }
        }

        None
    }
}

#[async_trait]
impl Strategy for EmbedStrategy {
    fn name(&self) -> &'static str {
        "embed"
    }

    async fn resolve(&self, client: &reqwest::Client, shortcode: &str) -> Result<MediaCandidate, StrategyError> {
        let response = client
            .get(format!("{}/p/{}/embed/captioned/", self.base, shortcode))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StrategyError::Status(response.status()));
        }

        let html = response.text().await?;
        let media = Self::extract_media(&html).ok_or(StrategyError::NoMedia)?;
        candidate_from_shortcode_media(&media)
    }
}
