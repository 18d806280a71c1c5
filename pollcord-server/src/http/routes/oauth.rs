//! Discord OAuth proxy endpoints
//!
//! Upstream responses are relayed untouched: same status, same body, same
//! content type. Only transport failures become local errors.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, BearerToken};
use crate::http::server::AppState;
use crate::models::ValidationError;
use crate::oauth::{resolve_redirect_uri, UpstreamResponse};

/// Client id response
#[derive(Serialize)]
pub struct ClientIdResponse {
    pub client_id: String,
}

/// Authorization code exchange request
#[derive(Deserialize)]
pub struct TokenRequest {
    pub code: String,
}

fn relay(upstream: UpstreamResponse) -> Response {
    let mut response = (upstream.status, upstream.body).into_response();
    match upstream.content_type {
        Some(content_type) => {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    response
}

/// GET /api/client-id
async fn client_id(State(state): State<Arc<AppState>>) -> Json<ClientIdResponse> {
    Json(ClientIdResponse {
        client_id: state.discord.config().client_id.clone(),
    })
}

/// POST /api/token - exchange an authorization code
async fn exchange_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<TokenRequest>,
) -> Result<Response, ApiError> {
    let code = req.code.trim();
    if code.is_empty() {
        return Err(ValidationError::Empty { field: "code" }.into());
    }

    let redirect_uri = resolve_redirect_uri(state.discord.config().redirect_uri.as_deref(), &headers);
    let upstream = state
        .discord
        .exchange_code(code, redirect_uri.as_deref())
        .await?;

    Ok(relay(upstream))
}

/// GET /api/users/@me
async fn current_user(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> Result<Response, ApiError> {
    Ok(relay(state.discord.current_user(&token).await?))
}

/// GET /api/users/@me/guilds
async fn current_user_guilds(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> Result<Response, ApiError> {
    Ok(relay(state.discord.current_user_guilds(&token).await?))
}

/// OAuth proxy routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/client-id", get(client_id))
        .route("/api/token", post(exchange_token))
        .route("/api/authenticate", post(exchange_token))
        .route("/api/users/@me", get(current_user))
        .route("/api/users/@me/guilds", get(current_user_guilds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::testing::test_state;

    fn app(api_base: &str) -> Router {
        router().with_state(Arc::new(test_state(api_base)))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn token_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/token")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn client_id_from_config() {
        let response = app("http://127.0.0.1:9")
            .oneshot(Request::builder().uri("/api/client-id").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["client_id"], "client-1");
    }

    #[tokio::test]
    async fn token_exchange_relays_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("code=the-code"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "tok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = app(&server.uri())
            .oneshot(token_request(r#"{"code": "the-code"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["access_token"], "tok");
    }

    #[tokio::test]
    async fn token_exchange_relays_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "invalid_grant"})),
            )
            .mount(&server)
            .await;

        let response = app(&server.uri())
            .oneshot(token_request(r#"{"code": "expired"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "invalid_grant");
    }

    #[tokio::test]
    async fn token_exchange_uses_forwarded_host() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("redirect_uri=https%3A%2F%2Fabc.ngrok.io%2F"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/authenticate")
            .header("content-type", "application/json")
            .header("x-forwarded-host", "abc.ngrok.io")
            .body(Body::from(r#"{"code": "c"}"#))
            .unwrap();

        let response = app(&server.uri()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_code_is_rejected() {
        let response = app("http://127.0.0.1:9")
            .oneshot(token_request(r#"{"code": "  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_502() {
        let response = app("http://127.0.0.1:9")
            .oneshot(token_request(r#"{"code": "c"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn current_user_requires_bearer() {
        let response = app("http://127.0.0.1:9")
            .oneshot(Request::builder().uri("/api/users/@me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "unauthorized");
    }

    #[tokio::test]
    async fn guilds_reject_non_bearer_scheme() {
        let request = Request::builder()
            .uri("/api/users/@me/guilds")
            .header("authorization", "Basic abc")
            .body(Body::empty())
            .unwrap();

        let response = app("http://127.0.0.1:9").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn guilds_pass_token_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/@me/guilds"))
            .and(header("authorization", "Bearer user-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": "1", "name": "Guild"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = Request::builder()
            .uri("/api/users/@me/guilds")
            .header("authorization", "Bearer user-token")
            .body(Body::empty())
            .unwrap();

        let response = app(&server.uri()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await[0]["name"], "Guild");
    }

    #[tokio::test]
    async fn expired_token_status_is_relayed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/@me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "401: Unauthorized", "code": 0})),
            )
            .mount(&server)
            .await;

        let request = Request::builder()
            .uri("/api/users/@me")
            .header("authorization", "Bearer stale")
            .body(Body::empty())
            .unwrap();

        let response = app(&server.uri()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], 0);
    }
}
