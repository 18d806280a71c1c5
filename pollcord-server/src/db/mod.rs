//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - One shared connection pool, no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::PgPool;

    /// Pool against `DATABASE_URL` with the schema applied.
    pub async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = super::create_pool(&url).await.expect("pool creation failed");
        super::migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    /// Random positive id so tests don't collide across runs.
    pub fn unique_user_id() -> i64 {
        ((uuid::Uuid::new_v4().as_u128() as i64) & i64::MAX).max(1)
    }
}
