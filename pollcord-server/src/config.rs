//! Discord OAuth configuration

/// Production Discord API base URL
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api";

/// Error raised when a required variable is missing
#[derive(Debug, thiserror::Error)]
#[error("{0} not set")]
pub struct MissingVar(pub &'static str);

/// OAuth client credentials and upstream location
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Explicit redirect URI; takes precedence over proxy headers
    pub redirect_uri: Option<String>,
    /// Discord API base, without trailing slash
    pub api_base: String,
}

impl OAuthConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            api_base: DEFAULT_DISCORD_API_BASE.to_string(),
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl AsRef<str>) -> Self {
        self.api_base = api_base.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Read DISCORD_CLIENT_ID, DISCORD_CLIENT_SECRET, and the optional
    /// DISCORD_REDIRECT_URI / DISCORD_API_BASE.
    pub fn from_env() -> Result<Self, MissingVar> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MissingVar> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = non_empty("DISCORD_CLIENT_ID").ok_or(MissingVar("DISCORD_CLIENT_ID"))?;
        let client_secret =
            non_empty("DISCORD_CLIENT_SECRET").ok_or(MissingVar("DISCORD_CLIENT_SECRET"))?;

        let mut config = Self::new(client_id, client_secret);
        if let Some(uri) = non_empty("DISCORD_REDIRECT_URI") {
            config = config.with_redirect_uri(uri);
        }
        if let Some(base) = non_empty("DISCORD_API_BASE") {
            config = config.with_api_base(base);
        }
        Ok(config)
    }
}

// Keep the secret out of logs
impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_vars() {
        let config = OAuthConfig::from_lookup(lookup(&[
            ("DISCORD_CLIENT_ID", "123"),
            ("DISCORD_CLIENT_SECRET", "shh"),
        ]))
        .unwrap();

        assert_eq!(config.client_id, "123");
        assert_eq!(config.client_secret, "shh");
        assert_eq!(config.redirect_uri, None);
        assert_eq!(config.api_base, DEFAULT_DISCORD_API_BASE);
    }

    #[test]
    fn missing_secret_names_variable() {
        let err = OAuthConfig::from_lookup(lookup(&[("DISCORD_CLIENT_ID", "123")])).unwrap_err();
        assert_eq!(err.to_string(), "DISCORD_CLIENT_SECRET not set");
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = OAuthConfig::from_lookup(lookup(&[
            ("DISCORD_CLIENT_ID", "  "),
            ("DISCORD_CLIENT_SECRET", "shh"),
        ]))
        .unwrap_err();
        assert_eq!(err.0, "DISCORD_CLIENT_ID");
    }

    #[test]
    fn optional_overrides() {
        let config = OAuthConfig::from_lookup(lookup(&[
            ("DISCORD_CLIENT_ID", "123"),
            ("DISCORD_CLIENT_SECRET", "shh"),
            ("DISCORD_REDIRECT_URI", "https://example.com/cb"),
            ("DISCORD_API_BASE", "http://127.0.0.1:9999/api/"),
        ]))
        .unwrap();

        assert_eq!(config.redirect_uri.as_deref(), Some("https://example.com/cb"));
        assert_eq!(config.api_base, "http://127.0.0.1:9999/api");
    }

    #[test]
    fn debug_redacts_secret() {
        let config = OAuthConfig::new("123", "very-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("very-secret"));
    }
}
