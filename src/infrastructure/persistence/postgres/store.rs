//! # PostgreSQL Store
//!
//! [`Store`] backed by a `sqlx::PgPool`. Each session is a database
//! transaction.

use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, Session, Store,
};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;
use tracing::info;

/// Pool settings used by [`PostgresStore::connect`].
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// How long to wait for a connection.
    pub acquire_timeout: Duration,
}

/// PostgreSQL implementation of [`Store`].
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the database is unreachable.
    pub async fn connect(url: &str, settings: &PoolSettings) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Query`] if a migration fails.
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        info!("database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn begin(&self) -> RepositoryResult<Box<dyn Session>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::transaction(e.to_string()))?;
        Ok(Box::new(PostgresSession { tx }))
    }
}

/// A session wrapping one PostgreSQL transaction.
///
/// Dropping it without [`Session::commit`] rolls the transaction back.
pub struct PostgresSession {
    pub(super) tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl Session for PostgresSession {
    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| RepositoryError::transaction(e.to_string()))
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| RepositoryError::transaction(e.to_string()))
    }
}
