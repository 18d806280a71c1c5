//! Route handlers organized by resource

pub mod health;
pub mod oauth;
pub mod polls;
pub mod users;
