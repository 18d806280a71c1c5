//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON body whose rejections use the API error shape
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Bearer token taken from the `Authorization` header
#[derive(Debug)]
pub struct BearerToken(pub String);

impl BearerToken {
    fn parse(value: &str) -> Result<Self, ApiError> {
        let (scheme, token) = value.trim().split_once(' ').ok_or(ApiError::Unauthorized {
            reason: "malformed authorization header",
        })?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(ApiError::Unauthorized {
                reason: "authorization scheme must be Bearer",
            });
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::Unauthorized {
                reason: "malformed authorization header",
            });
        }

        Ok(Self(token.to_owned()))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiError::Unauthorized {
                reason: "missing bearer token",
            })?
            .to_str()
            .map_err(|_| ApiError::Unauthorized {
                reason: "malformed authorization header",
            })?;

        Self::parse(value)
    }
}

/// Extract and validate a UUID from path
pub struct ValidUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidUuid
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "path segment could not be read",
                })
            })?;

        let uuid = Uuid::parse_str(&id).map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "invalid UUID format",
            })
        })?;

        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[test]
    fn parses_bearer() {
        let token = BearerToken::parse("Bearer abc.def").unwrap();
        assert_eq!(token.0, "abc.def");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert!(BearerToken::parse("bearer abc").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = BearerToken::parse("Basic dXNlcjpwYXNz").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
    }

    #[test]
    fn rejects_missing_token() {
        assert!(BearerToken::parse("Bearer").is_err());
        assert!(BearerToken::parse("Bearer    ").is_err());
    }

    async fn uuid_message(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body["message"].as_str().unwrap_or_default().to_owned())
    }

    async fn echo(ValidUuid(id): ValidUuid) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn unreadable_path_is_invalid_format() {
        // Route has no path parameter, so Path extraction itself fails
        let app = axum::Router::new().route("/poll", get(echo));

        let (status, message) = uuid_message(app, "/poll").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "id: path segment could not be read");
    }

    #[tokio::test]
    async fn non_uuid_path_is_invalid_format() {
        let app = axum::Router::new().route("/poll/{id}", get(echo));

        let (status, message) = uuid_message(app, "/poll/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "id: invalid UUID format");
    }
}
