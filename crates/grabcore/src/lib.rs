//! Core library for Reelgrab.
//!
//! Turns an Instagram post/reel/tv URL into a concrete downloadable media
//! URL. The pipeline is: validate the URL and extract its shortcode, then
//! walk an ordered list of extraction strategies (GraphQL API, embed page,
//! post page scrape) until one yields a usable media URL.
//!
//! The HTTP surface lives in the `reelgrab` crate; this crate has no
//! server dependencies and can be driven from tests or a CLI directly.

pub mod config;
pub mod error;
pub mod resolve;
pub mod shortcode;

pub use error::ResolveError;
pub use resolve::{MediaCandidate, Resolver, SaveType};
pub use shortcode::extract_shortcode;
