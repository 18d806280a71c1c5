//! Redirect URI resolution for the code exchange

use axum::http::HeaderMap;

const FORWARDED_HOST: &str = "x-forwarded-host";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Pick the redirect URI to send with a code exchange.
///
/// An explicitly configured URI always wins. Behind a reverse proxy the URI
/// is rebuilt from `X-Forwarded-Host` and `X-Forwarded-Proto` (defaulting to
/// https). With neither available no redirect URI is sent.
pub fn resolve_redirect_uri(configured: Option<&str>, headers: &HeaderMap) -> Option<String> {
    if let Some(uri) = configured {
        return Some(uri.to_owned());
    }

    let host = first_value(headers, FORWARDED_HOST)?;
    let proto = first_value(headers, FORWARDED_PROTO).unwrap_or("https");
    Some(format!("{}://{}/", proto, host))
}

/// First entry of a possibly comma-separated proxy header
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|v| !v.is_empty())
}
