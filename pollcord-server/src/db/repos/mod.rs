//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement or one transaction per operation
//! - Constraint violations are mapped to `DbError` variants, never pre-checked

pub mod links;
pub mod polls;
pub mod users;

pub use links::{Availability, Link, LinkRepo};
pub use polls::{NewPoll, Poll, PollRepo};
pub use users::{User, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} '{id}' already exists")]
    Conflict { resource: &'static str, id: String },
}

/// True when the error is a PostgreSQL unique violation (23505).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Constraint name of a foreign-key violation (23503), if that is what the error is.
pub(crate) fn foreign_key_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => db.constraint(),
        _ => None,
    }
}
