//! Poll repository

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{foreign_key_constraint, DbError};
use crate::models::{DateRange, PollName};

/// Poll record from database
#[derive(Debug, Clone, FromRow)]
pub struct Poll {
    pub id: Uuid,
    pub name: String,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Validated input for a new poll
#[derive(Debug, Clone)]
pub struct NewPoll {
    pub name: PollName,
    pub creator_id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub dates: DateRange,
}

/// Poll repository
pub struct PollRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PollRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a poll. The id and creation timestamp are assigned by the database.
    pub async fn create(&self, poll: NewPoll) -> Result<Poll, DbError> {
        sqlx::query_as::<_, Poll>(
            r#"
            INSERT INTO polls (name, creator_id, start_time, end_time, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, creator_id, created_at, start_time, end_time, start_date, end_date
            "#,
        )
        .bind(poll.name.as_str())
        .bind(poll.creator_id)
        .bind(poll.start_time)
        .bind(poll.end_time)
        .bind(poll.dates.start())
        .bind(poll.dates.end())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if foreign_key_constraint(&e).is_some() {
                DbError::NotFound {
                    resource: "user",
                    id: poll.creator_id.to_string(),
                }
            } else {
                DbError::Sqlx(e)
            }
        })
    }

    /// Get a single poll by id.
    pub async fn get(&self, id: Uuid) -> Result<Poll, DbError> {
        sqlx::query_as::<_, Poll>(
            r#"
            SELECT id, name, creator_id, created_at, start_time, end_time, start_date, end_date
            FROM polls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "poll",
            id: id.to_string(),
        })
    }
}
