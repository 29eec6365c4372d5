//! # Repository Traits
//!
//! Storage ports used by the application layer.
//!
//! A [`Store`] hands out one [`Session`] per unit of work. Every read and
//! write of that unit goes through the session, and nothing becomes visible
//! to other sessions until [`Session::commit`] is called. Dropping a session
//! without committing discards its writes.

use crate::domain::entities::{Counterparty, EntryDraft, LedgerEntry};
use crate::domain::value_objects::{CounterpartyId, EntryId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Storage failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Could not reach the backend.
    #[error("connection error: {0}")]
    Connection(String),

    /// A statement failed.
    #[error("query error: {0}")]
    Query(String),

    /// A stored row could not be mapped to a domain value.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Begin, commit or rollback failed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// The backend refused the write.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a transaction error.
    #[must_use]
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction(message.into())
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Counterparty storage.
#[async_trait]
pub trait CounterpartyRepository: Send {
    /// Returns every counterparty, ordered by id.
    async fn list_counterparties(&mut self) -> RepositoryResult<Vec<Counterparty>>;

    /// Finds a counterparty by id.
    async fn find_counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> RepositoryResult<Option<Counterparty>>;

    /// Inserts a counterparty and returns it with its assigned id.
    async fn insert_counterparty(&mut self, name: &str) -> RepositoryResult<Counterparty>;

    /// Overwrites the name of a stored counterparty.
    ///
    /// Returns `false` if no row has that id.
    async fn update_counterparty(&mut self, counterparty: &Counterparty) -> RepositoryResult<bool>;

    /// Deletes a counterparty, clearing the reference on any entry that
    /// points at it.
    ///
    /// Returns `false` if no row has that id.
    async fn delete_counterparty(&mut self, id: CounterpartyId) -> RepositoryResult<bool>;
}

/// Ledger entry storage.
#[async_trait]
pub trait EntryRepository: Send {
    /// Returns every entry, ordered by id.
    async fn list_entries(&mut self) -> RepositoryResult<Vec<LedgerEntry>>;

    /// Finds an entry by id.
    async fn find_entry(&mut self, id: EntryId) -> RepositoryResult<Option<LedgerEntry>>;

    /// Returns the entries referencing a counterparty, ordered by id.
    async fn entries_by_counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> RepositoryResult<Vec<LedgerEntry>>;

    /// Counts entries whose due date falls in `year`/`month`.
    async fn count_entries_due_in(&mut self, year: i32, month: u32) -> RepositoryResult<u64>;

    /// Returns payable entries whose due date falls in `year`.
    async fn payables_due_in(&mut self, year: i32) -> RepositoryResult<Vec<LedgerEntry>>;

    /// Inserts an unsettled entry and returns it with its assigned id.
    async fn insert_entry(&mut self, draft: &EntryDraft) -> RepositoryResult<LedgerEntry>;

    /// Overwrites every column of a stored entry.
    ///
    /// Returns `false` if no row has that id.
    async fn update_entry(&mut self, entry: &LedgerEntry) -> RepositoryResult<bool>;

    /// Deletes an entry.
    ///
    /// Returns `false` if no row has that id.
    async fn delete_entry(&mut self, id: EntryId) -> RepositoryResult<bool>;
}

/// A unit of work over both repositories.
#[async_trait]
pub trait Session: CounterpartyRepository + EntryRepository {
    /// Makes the session's writes visible.
    async fn commit(self: Box<Self>) -> RepositoryResult<()>;

    /// Discards the session's writes.
    async fn rollback(self: Box<Self>) -> RepositoryResult<()>;
}

/// Opens sessions.
#[async_trait]
pub trait Store: Send + Sync + fmt::Debug {
    /// Begins a new session.
    async fn begin(&self) -> RepositoryResult<Box<dyn Session>>;
}
