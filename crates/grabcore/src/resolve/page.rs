//! Page strategy — last resort, scrapes the public post page itself.
//!
//! Reads `<script type="application/ld+json">` structured data first
//! (`video.contentUrl` / `image`), then falls back to the `og:video` /
//! `og:image` meta tags.

use crate::resolve::strategy::{Strategy, StrategyError};
use crate::resolve::MediaCandidate;
use async_trait::async_trait;
use select::document::Document;
use select::predicate::Name;

pub struct PageStrategy {
    base: String,
}

impl PageStrategy {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// `image` in ld+json is either a plain string or an array of them.
    fn ld_image(data: &serde_json::Value) -> Option<String> {
        match data.get("image") {
            Some(serde_json::Value::String(url)) => Some(url.clone()),
            Some(serde_json::Value::Array(urls)) => urls.first().and_then(|v| v.as_str()).map(String::from),
            _ => None,
        }
    }

    fn candidate_from_html(html: &str) -> Option<MediaCandidate> {
        let document = Document::from(html);

        // Structured data blocks; a post page can carry several, ignore the
        // ones that don't parse or describe no media.
        for script in document
            .find(Name("script"))
            .filter(|n| n.attr("type") == Some("application/ld+json"))
        {
            let Ok(data) = serde_json::from_str::<serde_json::Value>(&script.text()) else {
                continue;
            };
            if let Some(content_url) = data.pointer("/video/contentUrl").and_then(|v| v.as_str()) {
                let display_url = Self::ld_image(&data)
                    .or_else(|| data.pointer("/video/thumbnailUrl").and_then(|v| v.as_str()).map(String::from));
                return Some(MediaCandidate {
                    video_url: Some(content_url.to_string()),
                    display_url,
                    is_video: true,
                });
            }
            if let Some(image) = Self::ld_image(&data) {
                return Some(MediaCandidate {
                    video_url: None,
                    display_url: Some(image),
                    is_video: false,
                });
            }
        }

        // Open Graph meta tags
        let meta_content = |property: &str| {
            document
                .find(Name("meta"))
                .find(|n| n.attr("property") == Some(property))
                .and_then(|n| n.attr("content"))
                .map(String::from)
        };
        let video_url = meta_content("og:video");
        let image_url = meta_content("og:image");
        if video_url.is_some() || image_url.is_some() {
            let is_video = video_url.is_some();
            return Some(MediaCandidate {
                display_url: image_url.or_else(|| video_url.clone()),
                video_url,
                is_video,
            });
        }

        None
    }
}

#[async_trait]
impl Strategy for PageStrategy {
    fn name(&self) -> &'static str {
        "page"
    }

    async fn resolve(&self, client: &reqwest::Client, shortcode: &str) -> Result<MediaCandidate, StrategyError> {
        let response = client
            .get(format!("{}/p/{}/", self.base, shortcode))
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .header("Referer", "https://www.google.com/")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StrategyError::Status(response.status()));
        }

        let html = response.text().await?;
        let candidate = Self::candidate_from_html(&html).ok_or(StrategyError::NoMedia)?;
        if candidate.download_url().is_none() {
            return Err(StrategyError::NoMedia);
        }
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ld_json_video() {
        let html = concat!(
            r#"<html><head><script type="application/ld+json">"#,
            r#"{"video":{"contentUrl":"https://cdn/x.mp4","thumbnailUrl":"https://cdn/t.jpg"}}"#,
            "</script></head></html>"
        );
        let candidate = PageStrategy::candidate_from_html(html).unwrap();
        assert_eq!(candidate.video_url.as_deref(), Some("https://cdn/x.mp4"));
        assert_eq!(candidate.display_url.as_deref(), Some("https://cdn/t.jpg"));
        assert!(candidate.is_video);
    }

    #[test]
    fn test_ld_json_image_array() {
        let html = concat!(
            r#"<script type="application/ld+json">"#,
            r#"{"image":["https://cdn/a.jpg","https://cdn/b.jpg"]}"#,
            "</script>"
        );
        let candidate = PageStrategy::candidate_from_html(html).unwrap();
        assert_eq!(candidate.download_url(), Some("https://cdn/a.jpg"));
        assert!(!candidate.is_video);
    }

    #[test]
    fn test_og_meta_fallback() {
        let html = concat!(
            r#"<html><head>"#,
            r#"<meta property="og:video" content="https://cdn/v.mp4"/>"#,
            r#"<meta property="og:image" content="https://cdn/i.jpg"/>"#,
            "</head></html>"
        );
        let candidate = PageStrategy::candidate_from_html(html).unwrap();
        assert_eq!(candidate.download_url(), Some("https://cdn/v.mp4"));
        assert!(candidate.is_video);
    }

    #[test]
    fn test_og_image_only_is_not_video() {
        let html = r#"<meta property="og:image" content="https://cdn/i.jpg"/>"#;
        let candidate = PageStrategy::candidate_from_html(html).unwrap();
        assert_eq!(candidate.download_url(), Some("https://cdn/i.jpg"));
        assert!(!candidate.is_video);
    }

    #[test]
    fn test_malformed_ld_json_is_skipped() {
        let html = concat!(
            r#"<script type="application/ld+json">{not json}</script>"#,
            r#"<meta property="og:image" content="https://cdn/i.jpg"/>"#,
        );
        let candidate = PageStrategy::candidate_from_html(html).unwrap();
        assert_eq!(candidate.download_url(), Some("https://cdn/i.jpg"));
    }

    #[test]
    fn test_bare_page_yields_nothing() {
        assert!(PageStrategy::candidate_from_html("<html><body>nope</body></html>").is_none());
    }
}
