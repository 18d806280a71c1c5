//! pollcord-server: Discord OAuth proxy and scheduling-poll store
//!
//! Serves a Discord activity's single-page client, exchanges OAuth codes on
//! its behalf, and stores users, polls, and per-user availability in
//! PostgreSQL.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod oauth;

pub use config::OAuthConfig;
pub use http::{run_server, AppState, ServerConfig};
