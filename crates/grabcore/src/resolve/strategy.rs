//! The extraction strategy capability and its local failure type.

use crate::resolve::MediaCandidate;
use async_trait::async_trait;
use thiserror::Error;

/// One self-contained way of turning a shortcode into a media candidate.
///
/// Strategies are independent network calls with their own parsing; the
/// resolver walks them in priority order and a failure here only means
/// "try the next one" — nothing from this type reaches the client.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Short name used in fallback logging.
    fn name(&self) -> &'static str;

    /// Attempt to resolve a media candidate for `shortcode`.
    async fn resolve(&self, client: &reqwest::Client, shortcode: &str) -> Result<MediaCandidate, StrategyError>;
}

/// Why a single strategy attempt failed. Always absorbed by the resolver.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("response carried no media")]
    NoMedia,
}

/// Read a media candidate out of a GraphQL `shortcode_media` node.
///
/// Shared by the GraphQL and embed strategies — the embed page carries the
/// same node shape inside its inline script payloads.
pub(crate) fn candidate_from_shortcode_media(media: &serde_json::Value) -> Result<MediaCandidate, StrategyError> {
    let is_video = media.get("is_video").and_then(|v| v.as_bool()).unwrap_or(false);
    let video_url = media.get("video_url").and_then(|v| v.as_str()).map(String::from);
    let display_url = media.get("display_url").and_then(|v| v.as_str()).map(String::from);

    let candidate = MediaCandidate {
        video_url,
        display_url,
        is_video,
    };
    if candidate.download_url().is_none() {
        return Err(StrategyError::NoMedia);
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_from_video_node() {
        let media = json!({
            "is_video": true,
            "video_url": "https://cdn/x.mp4",
            "display_url": "https://cdn/x.jpg"
        });
        let candidate = candidate_from_shortcode_media(&media).unwrap();
        assert!(candidate.is_video);
        assert_eq!(candidate.download_url(), Some("https://cdn/x.mp4"));
    }

    #[test]
    fn test_candidate_from_image_node() {
        let media = json!({ "is_video": false, "display_url": "https://cdn/x.jpg" });
        let candidate = candidate_from_shortcode_media(&media).unwrap();
        assert!(!candidate.is_video);
        assert_eq!(candidate.download_url(), Some("https://cdn/x.jpg"));
    }

    #[test]
    fn test_node_without_urls_is_no_media() {
        let media = json!({ "is_video": false });
        assert!(matches!(
            candidate_from_shortcode_media(&media),
            Err(StrategyError::NoMedia)
        ));
    }
}
