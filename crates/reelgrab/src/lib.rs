//! Reelgrab — HTTP service that resolves Instagram post/reel URLs to
//! downloadable media URLs.
//!
//! Library surface exists so integration tests can build the router
//! without binding a socket.

pub mod cli;
pub mod handlers;
pub mod server;
