//! Discord OAuth proxy: token exchange and authenticated passthrough

pub mod client;
pub mod redirect;

pub use client::{DiscordClient, UpstreamError, UpstreamResponse};
pub use redirect::resolve_redirect_uri;
