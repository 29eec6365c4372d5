//! # PostgreSQL Persistence
//!
//! [`PostgresStore`] and the repository implementations of its session,
//! using sqlx.

mod counterparty_repository;
mod entry_repository;
pub mod store;

#[cfg(test)]
mod tests;

pub use store::{PoolSettings, PostgresSession, PostgresStore};
