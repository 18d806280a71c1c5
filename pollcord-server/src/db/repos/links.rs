//! User/poll link repository, including declared availability
//!
//! - create: plain INSERT, the (user_id, poll_id) unique constraint rejects duplicates
//! - add_available_times: link lookup + bulk insert in one transaction

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{foreign_key_constraint, is_unique_violation, DbError};

/// Link record from database
#[derive(Debug, Clone, FromRow)]
pub struct Link {
    pub id: Uuid,
    pub user_id: i64,
    pub poll_id: Uuid,
}

/// One declared availability slot, joined back to its user
#[derive(Debug, Clone, FromRow)]
pub struct Availability {
    pub user_id: i64,
    pub time_available: DateTime<Utc>,
}

/// Link repository
pub struct LinkRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LinkRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Associate a user with a poll.
    ///
    /// Fails with `Conflict` if the pair is already linked and with `NotFound`
    /// if either side does not exist.
    pub async fn create(&self, user_id: i64, poll_id: Uuid) -> Result<Link, DbError> {
        sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO user_poll_links (user_id, poll_id)
            VALUES ($1, $2)
            RETURNING id, user_id, poll_id
            "#,
        )
        .bind(user_id)
        .bind(poll_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return DbError::Conflict {
                    resource: "link",
                    id: format!("{}/{}", user_id, poll_id),
                };
            }
            let missing_user =
                foreign_key_constraint(&e).map(|c| c == "user_poll_links_user_id_fkey");
            match missing_user {
                Some(true) => DbError::NotFound {
                    resource: "user",
                    id: user_id.to_string(),
                },
                Some(false) => DbError::NotFound {
                    resource: "poll",
                    id: poll_id.to_string(),
                },
                None => DbError::Sqlx(e),
            }
        })
    }

    /// Record availability for the user's link to the poll.
    ///
    /// Returns `Ok(None)` without writing anything when the user is not
    /// linked to the poll. Otherwise returns the number of new rows;
    /// timestamps already recorded are skipped.
    pub async fn add_available_times(
        &self,
        poll_id: Uuid,
        user_id: i64,
        times: &[DateTime<Utc>],
    ) -> Result<Option<u64>, DbError> {
        let mut tx = self.pool.begin().await?;

        let link_id: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM user_poll_links WHERE user_id = $1 AND poll_id = $2 LIMIT 1",
        )
        .bind(user_id)
        .bind(poll_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((link_id,)) = link_id else {
            tracing::debug!(%poll_id, user_id, "no link for availability insert");
            return Ok(None);
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO available_times (link_id, time_available)
            SELECT $1, t FROM UNNEST($2::timestamptz[]) AS t
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(link_id)
        .bind(times)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(Some(inserted))
    }

    /// All availability declared for a poll, ordered by time then user.
    pub async fn list_availability(&self, poll_id: Uuid) -> Result<Vec<Availability>, DbError> {
        let poll_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM polls WHERE id = $1)")
                .bind(poll_id)
                .fetch_one(self.pool)
                .await?;

        if !poll_exists.0 {
            return Err(DbError::NotFound {
                resource: "poll",
                id: poll_id.to_string(),
            });
        }

        let rows = sqlx::query_as::<_, Availability>(
            r#"
            SELECT l.user_id, a.time_available
            FROM available_times a
            JOIN user_poll_links l ON l.id = a.link_id
            WHERE l.poll_id = $1
            ORDER BY a.time_available, l.user_id
            "#,
        )
        .bind(poll_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
