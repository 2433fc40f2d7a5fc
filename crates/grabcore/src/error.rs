use thiserror::Error;

/// Terminal outcomes of a resolution request.
///
/// Per-strategy failures are absorbed inside the resolver and never reach
/// this type; only the five externally visible categories do. The display
/// strings double as the user-facing `error` field of the failure envelope.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Request carried no URL at all
    #[error("No URL provided")]
    MissingUrl,

    /// URL does not match a supported Instagram post/reel/tv shape
    #[error("Invalid Instagram URL. Please provide a valid Instagram post, reel, or TV URL.")]
    InvalidUrl,

    /// Every extraction strategy was exhausted without a usable media URL
    #[error("Could not extract media information from Instagram. The post might be private or unavailable.")]
    ResolutionFailed,

    /// Audio was requested for a post that holds only images
    #[error("This post contains only images. Audio extraction is only available for videos.")]
    UnsupportedMediaForAudio,

    /// Unexpected fault outside the per-strategy fallback handling
    #[error("Failed to process Instagram URL")]
    Upstream(String),
}

impl ResolveError {
    /// Stable machine-usable category for the failure envelope and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::MissingUrl => "missing_url",
            ResolveError::InvalidUrl => "invalid_url",
            ResolveError::ResolutionFailed => "resolution_failed",
            ResolveError::UnsupportedMediaForAudio => "unsupported_media_for_audio",
            ResolveError::Upstream(_) => "upstream_error",
        }
    }

    /// Free-text detail, present only for upstream faults.
    pub fn details(&self) -> Option<&str> {
        match self {
            ResolveError::Upstream(details) => Some(details),
            _ => None,
        }
    }
}

/// Type alias for Result with ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;
