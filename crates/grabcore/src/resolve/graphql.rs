//! GraphQL strategy — Instagram's internal shortcode-media query.
//!
//! Highest-priority strategy: a POST to `/api/graphql` with the public
//! web-app headers and the rotating `doc_id`. Works for public posts
//! without login; the `doc_id` is configurable via `INSTAGRAM_DOC_ID`
//! because Instagram rotates it every few weeks.

use crate::config;
use crate::resolve::strategy::{candidate_from_shortcode_media, Strategy, StrategyError};
use crate::resolve::MediaCandidate;
use async_trait::async_trait;

pub struct GraphQlStrategy {
    base: String,
}

impl GraphQlStrategy {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl Strategy for GraphQlStrategy {
    fn name(&self) -> &'static str {
        "graphql"
    }

    async fn resolve(&self, client: &reqwest::Client, shortcode: &str) -> Result<MediaCandidate, StrategyError> {
        let variables = format!(r#"{{"shortcode":"{}"}}"#, shortcode);
        let body = format!(
            "doc_id={}&variables={}&lsd={}",
            config::INSTAGRAM_DOC_ID.as_str(),
            urlencoding::encode(&variables),
            config::FB_LSD_TOKEN
        );

        let response = client
            .post(format!("{}/api/graphql", self.base))
            .header("X-IG-App-ID", config::IG_APP_ID)
            .header("X-FB-LSD", config::FB_LSD_TOKEN)
            .header("X-ASBD-ID", config::FB_ASBD_ID)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Referer", "https://www.instagram.com/")
            .header("Origin", "https://www.instagram.com")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StrategyError::Status(response.status()));
        }

        // Expired cookies or a rotated doc_id make Instagram answer with an
        // HTML login page instead of JSON; that surfaces here as Parse.
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StrategyError::Parse(format!("GraphQL returned non-JSON: {}", e)))?;

        if let Some(message) = body.get("message").and_then(|v| v.as_str()) {
            if message.contains("useragent mismatch") || message.contains("doc_id") {
                log::error!("GraphQL strategy: possible doc_id expiry: {}", message);
                return Err(StrategyError::Parse(format!("doc_id may be expired: {}", message)));
            }
        }

        let media = body
            .pointer("/data/xdt_shortcode_media")
            .or_else(|| body.pointer("/data/shortcode_media"))
            .ok_or(StrategyError::NoMedia)?;

        candidate_from_shortcode_media(media)
    }
}
