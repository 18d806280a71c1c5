//! HTTP client for the Discord API
//!
//! Responses are not interpreted: status, content type, and body are handed
//! back as-is so the HTTP layer can relay them to the caller.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use reqwest::Client;

use crate::config::OAuthConfig;

const USER_AGENT: &str = concat!("pollcord/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Transport-level failure talking to Discord (no response received)
#[derive(Debug, thiserror::Error)]
#[error("upstream request failed: {0}")]
pub struct UpstreamError(#[from] reqwest::Error);

/// Raw upstream response to relay
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl UpstreamResponse {
    async fn read(response: reqwest::Response) -> Result<Self, UpstreamError> {
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::warn!(%status, "Discord returned an error response");
        }

        Ok(Self {
            status,
            content_type,
            body,
        })
    }
}

/// Discord API client sharing one connection pool across requests
#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    config: Arc<OAuthConfig>,
}

impl DiscordClient {
    pub fn new(config: OAuthConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Sends the form-encoded `authorization_code` grant to `/oauth2/token`.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = format!("{}/oauth2/token", self.config.api_base);

        let mut form = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
        ];
        if let Some(uri) = redirect_uri {
            form.push(("redirect_uri", uri));
        }

        tracing::debug!(has_redirect_uri = redirect_uri.is_some(), "exchanging authorization code");

        let response = self.http.post(&url).form(&form).send().await?;
        UpstreamResponse::read(response).await
    }

    /// GET /users/@me on behalf of the token holder
    pub async fn current_user(&self, token: &str) -> Result<UpstreamResponse, UpstreamError> {
        self.get_as_user("/users/@me", token).await
    }

    /// GET /users/@me/guilds on behalf of the token holder
    pub async fn current_user_guilds(
        &self,
        token: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.get_as_user("/users/@me/guilds", token).await
    }

    async fn get_as_user(&self, path: &str, token: &str) -> Result<UpstreamResponse, UpstreamError> {
        let url = format!("{}{}", self.config.api_base, path);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        UpstreamResponse::read(response).await
    }
}
