//! Poll endpoints: polls, user links, and declared availability

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{Availability, LinkRepo, NewPoll, Poll, PollRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ValidUuid};
use crate::http::server::AppState;
use crate::models::{DateRange, PollName};

/// Create poll request
#[derive(Deserialize)]
pub struct CreatePollRequest {
    pub name: String,
    pub creator_id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Id of a freshly created record
#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// Poll response
#[derive(Serialize)]
pub struct PollResponse {
    pub id: Uuid,
    pub name: String,
    pub creator_id: i64,
    pub created_at: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Poll> for PollResponse {
    fn from(p: Poll) -> Self {
        Self {
            id: p.id,
            name: p.name,
            creator_id: p.creator_id,
            created_at: p.created_at.to_rfc3339(),
            start_time: p.start_time,
            end_time: p.end_time,
            start_date: p.start_date,
            end_date: p.end_date,
        }
    }
}

/// Link request: which user joins the poll
#[derive(Deserialize)]
pub struct CreateLinkRequest {
    pub user_id: i64,
}

/// Availability submission
#[derive(Deserialize)]
pub struct AddAvailabilityRequest {
    pub user_id: i64,
    pub available_times: Vec<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct AddAvailabilityResponse {
    pub success: bool,
    pub inserted: u64,
}

#[derive(Serialize)]
pub struct AvailabilityEntry {
    pub user_id: i64,
    pub time_available: String,
}

impl From<Availability> for AvailabilityEntry {
    fn from(a: Availability) -> Self {
        Self {
            user_id: a.user_id,
            time_available: a.time_available.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub poll_id: Uuid,
    pub availability: Vec<AvailabilityEntry>,
}

/// POST /api/poll - create a poll
async fn create_poll(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePollRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let new_poll = NewPoll {
        name: PollName::new(&req.name)?,
        creator_id: req.creator_id,
        start_time: req.start_time,
        end_time: req.end_time,
        dates: DateRange::new(req.start_date, req.end_date)?,
    };

    let poll = PollRepo::new(&state.pool).create(new_poll).await?;
    tracing::info!(poll_id = %poll.id, creator_id = poll.creator_id, "created poll");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: poll.id })))
}

/// GET /api/poll/{poll_id}
async fn get_poll(
    State(state): State<Arc<AppState>>,
    ValidUuid(poll_id): ValidUuid,
) -> Result<Json<PollResponse>, ApiError> {
    let poll = PollRepo::new(&state.pool).get(poll_id).await?;
    Ok(Json(PollResponse::from(poll)))
}

/// POST /api/poll/{poll_id}/users - link a user to the poll
async fn create_link(
    State(state): State<Arc<AppState>>,
    ValidUuid(poll_id): ValidUuid,
    ApiJson(req): ApiJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let link = LinkRepo::new(&state.pool).create(req.user_id, poll_id).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: link.id })))
}

/// POST /api/poll/{poll_id}/availability
async fn add_availability(
    State(state): State<Arc<AppState>>,
    ValidUuid(poll_id): ValidUuid,
    ApiJson(req): ApiJson<AddAvailabilityRequest>,
) -> Result<Json<AddAvailabilityResponse>, ApiError> {
    let inserted = LinkRepo::new(&state.pool)
        .add_available_times(poll_id, req.user_id, &req.available_times)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "link",
            id: format!("{}/{}", req.user_id, poll_id),
        })?;

    Ok(Json(AddAvailabilityResponse {
        success: true,
        inserted,
    }))
}

/// GET /api/poll/{poll_id}/availability
async fn list_availability(
    State(state): State<Arc<AppState>>,
    ValidUuid(poll_id): ValidUuid,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let rows = LinkRepo::new(&state.pool).list_availability(poll_id).await?;

    Ok(Json(AvailabilityResponse {
        poll_id,
        availability: rows.into_iter().map(AvailabilityEntry::from).collect(),
    }))
}

/// Poll routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/poll", post(create_poll))
        .route("/api/poll/{poll_id}", get(get_poll))
        .route("/api/poll/{poll_id}/users", post(create_link))
        .route(
            "/api/poll/{poll_id}/availability",
            get(list_availability).post(add_availability),
        )
}
