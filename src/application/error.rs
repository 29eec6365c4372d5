//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Use cases fail with a missing record, a domain rule violation, or a
//! storage failure. Storage failures that happen after a write was staged
//! carry the fixed message shown to clients; the session has already been
//! rolled back when they are returned.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CounterpartyId, EntryId};
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A record does not exist. Holds a human-readable description of it.
    #[error("{0} não encontrado(a)")]
    NotFound(String),

    /// A domain rule was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage failed before anything was written.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Storage failed while persisting a change.
    #[error("{message}")]
    Persistence {
        /// Client-facing message.
        message: &'static str,
        /// Underlying failure.
        #[source]
        source: RepositoryError,
    },
}

impl ApplicationError {
    /// Message returned when creating an entry fails in storage.
    pub const CREATE_ENTRY_FAILED: &'static str = "Erro ao criar conta";
    /// Message returned when updating an entry fails in storage.
    pub const UPDATE_ENTRY_FAILED: &'static str = "Erro ao atualizar conta";

    /// Creates a not found error for an entry.
    #[must_use]
    pub fn entry_not_found(id: EntryId) -> Self {
        Self::NotFound(format!("Conta com ID {id}"))
    }

    /// Creates a not found error for a counterparty addressed directly.
    #[must_use]
    pub fn counterparty_not_found(id: CounterpartyId) -> Self {
        Self::NotFound(format!("Fornecedor ou cliente com ID {id}"))
    }

    /// Creates a not found error for a counterparty referenced by an entry.
    #[must_use]
    pub fn referenced_counterparty_not_found(id: CounterpartyId) -> Self {
        Self::NotFound(format!("Fornecedor com ID {id}"))
    }

    /// Creates the not found error returned when no counterparty exists.
    #[must_use]
    pub fn no_counterparties() -> Self {
        Self::NotFound("Fornecedor ou cliente".to_string())
    }

    /// Creates a persistence error with a client-facing message.
    #[must_use]
    pub fn persistence(message: &'static str, source: RepositoryError) -> Self {
        Self::Persistence { message, source }
    }

    /// Returns true for not found errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
