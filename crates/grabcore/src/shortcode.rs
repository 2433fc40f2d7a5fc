//! Instagram URL validation and shortcode extraction.
//!
//! The shortcode is the opaque `[A-Za-z0-9_-]+` token after `/p/`,
//! `/reel/`, `/reels/` or `/tv/`. Validation is purely syntactic — no
//! network call happens here, so malformed input is rejected for free.

use crate::config;
use crate::error::ResolveError;
use lazy_regex::regex_captures;

/// Extract the shortcode from an Instagram post/reel/tv URL.
///
/// Scheme and `www.` are optional, the host matches case-insensitively.
/// Share links with a username prefix (`/<username>/reel/<code>/`) are
/// accepted too.
///
/// # Errors
/// Returns `ResolveError::InvalidUrl` when the URL is overlong or matches
/// none of the accepted shapes.
pub fn extract_shortcode(url: &str) -> Result<String, ResolveError> {
    let url = url.trim();
    if url.is_empty() || url.len() > config::validation::MAX_URL_LENGTH {
        return Err(ResolveError::InvalidUrl);
    }

    if let Some((_, code)) = regex_captures!(
        r"(?i)^(?:https?://)?(?:www\.)?instagram\.com/(?:p|reel|reels|tv)/([A-Za-z0-9_-]+)",
        url
    ) {
        return Ok(code.to_string());
    }

    if let Some((_, code)) = regex_captures!(
        r"(?i)^(?:https?://)?(?:www\.)?instagram\.com/[A-Za-z0-9_.]+/(?:p|reel|reels|tv)/([A-Za-z0-9_-]+)",
        url
    ) {
        return Ok(code.to_string());
    }

    Err(ResolveError::InvalidUrl)
}
