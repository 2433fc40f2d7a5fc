use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the resolver.

/// Instagram GraphQL `doc_id` for the shortcode-media query.
/// Read from the INSTAGRAM_DOC_ID environment variable. Instagram rotates
/// this value every few weeks; the default is the one current at release.
pub static INSTAGRAM_DOC_ID: Lazy<String> =
    Lazy::new(|| env::var("INSTAGRAM_DOC_ID").unwrap_or_else(|_| "8845758582119845".to_string()));

/// Instagram internal app ID (public, embedded in the web app).
pub const IG_APP_ID: &str = "936619743392459";

/// Facebook LSD token (anti-CSRF, public static value used by web scrapers).
pub const FB_LSD_TOKEN: &str = "AVqbxe3J_YA";

/// Facebook ASBD ID (public, embedded in the web app).
pub const FB_ASBD_ID: &str = "129477";

/// Browser user agent sent on every upstream request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Network configuration
pub mod network {
    use super::{env, Duration, Lazy};

    /// Connect timeout for upstream requests (in seconds)
    pub const CONNECT_TIMEOUT_SECS: u64 = 15;

    /// Overall client timeout for a single upstream request (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Budget for one strategy attempt, including parsing.
    /// Read from STRATEGY_TIMEOUT_SECS; keeps one slow upstream from
    /// stalling the whole fallback chain.
    pub static STRATEGY_TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| {
        env::var("STRATEGY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8)
    });

    /// Connect timeout duration
    pub fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }

    /// Request timeout duration
    pub fn request_timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    /// Per-strategy timeout duration
    pub fn strategy_timeout() -> Duration {
        Duration::from_secs(*STRATEGY_TIMEOUT_SECS)
    }
}

/// Validation configuration
pub mod validation {
    /// Maximum URL length (RFC 7230 recommends 8000, but we use 2048 for safety)
    pub const MAX_URL_LENGTH: usize = 2048;
}
