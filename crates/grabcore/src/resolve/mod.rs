//! Media resolution — candidate model, extraction strategies, and the
//! sequential fallback resolver that walks them in priority order.

pub mod embed;
pub mod graphql;
pub mod page;
pub mod resolver;
pub mod strategy;

pub use resolver::Resolver;
pub use strategy::{Strategy, StrategyError};

use serde::{Deserialize, Serialize};

/// What the user wants saved from the post.
///
/// `Reel` is the wire value the client sends for video downloads
/// (`"video"` is accepted as an alias). The audio path is a documented
/// stub: no extraction happens, the video URL is returned with an
/// advisory message telling the user to convert it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveType {
    #[default]
    #[serde(alias = "video")]
    Reel,
    Audio,
}

/// Media found by one extraction strategy for a single post. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaCandidate {
    pub video_url: Option<String>,
    pub display_url: Option<String>,
    pub is_video: bool,
}

impl MediaCandidate {
    /// The URL worth downloading, video preferred over the display image.
    /// Empty strings count as absent.
    pub fn download_url(&self) -> Option<&str> {
        self.video_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.display_url.as_deref().filter(|u| !u.is_empty()))
    }

    /// Whether this candidate carries a video (either flagged or by URL).
    pub fn has_video(&self) -> bool {
        self.is_video || self.video_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Default download file name: `instagram_<shortcode>.<mp4|jpg>`.
pub fn default_file_name(shortcode: &str, is_video: bool) -> String {
    let extension = if is_video { "mp4" } else { "jpg" };
    format!("instagram_{}.{}", shortcode, extension)
}
