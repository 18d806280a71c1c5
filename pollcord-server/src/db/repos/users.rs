//! User repository

use sqlx::{FromRow, PgPool};

use super::{is_unique_violation, DbError};

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user by platform id. A second insert of the same id is a conflict.
    pub async fn create(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("INSERT INTO users (id) VALUES ($1) RETURNING id")
            .bind(id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::Conflict {
                        resource: "user",
                        id: id.to_string(),
                    }
                } else {
                    DbError::Sqlx(e)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{test_pool, unique_user_id};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p pollcord-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_user_returns_id() {
        let pool = test_pool().await;
        let id = unique_user_id();

        let user = UserRepo::new(&pool).create(id).await.unwrap();
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_user_is_conflict() {
        let pool = test_pool().await;
        let id = unique_user_id();
        let repo = UserRepo::new(&pool);

        repo.create(id).await.unwrap();
        let err = repo.create(id).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { resource: "user", .. }));
    }
}
