//! User endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::UserRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    /// Discord user id (snowflake)
    pub id: i64,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    pub message: &'static str,
}

/// POST /api/user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let user = UserRepo::new(&state.pool).create(req.id).await?;
    tracing::info!(user_id = user.id, "created user");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "successfully created user",
        }),
    ))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/user", post(create_user))
}
