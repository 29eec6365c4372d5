//! # Counterparty Use Cases
//!
//! CRUD on counterparties and the listing of their entries.

use super::entries::EntryDetails;
use crate::application::dto::CounterpartyRequest;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::Counterparty;
use crate::domain::value_objects::CounterpartyId;
use crate::infrastructure::persistence::{CounterpartyRepository, EntryRepository, Store};
use std::sync::Arc;
use tracing::{info, instrument};

/// Counterparty workflows.
#[derive(Debug, Clone)]
pub struct CounterpartyUseCases {
    store: Arc<dyn Store>,
}

impl CounterpartyUseCases {
    /// Creates the use cases over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Returns every counterparty.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] when there are none.
    #[instrument(skip(self))]
    pub async fn list(&self) -> ApplicationResult<Vec<Counterparty>> {
        let mut session = self.store.begin().await?;
        let all = session.list_counterparties().await?;
        if all.is_empty() {
            return Err(ApplicationError::no_counterparties());
        }
        Ok(all)
    }

    /// Returns one counterparty.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no counterparty has that id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: CounterpartyId) -> ApplicationResult<Counterparty> {
        let mut session = self.store.begin().await?;
        session
            .find_counterparty(id)
            .await?
            .ok_or_else(|| ApplicationError::counterparty_not_found(id))
    }

    /// Registers a counterparty.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Repository`] if storage fails.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &CounterpartyRequest) -> ApplicationResult<Counterparty> {
        let mut session = self.store.begin().await?;
        let counterparty = session.insert_counterparty(&request.nome).await?;
        session.commit().await?;
        info!(counterparty_id = %counterparty.id(), "counterparty created");
        Ok(counterparty)
    }

    /// Replaces the name of a counterparty.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no counterparty has that id.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: CounterpartyId,
        request: &CounterpartyRequest,
    ) -> ApplicationResult<Counterparty> {
        let mut session = self.store.begin().await?;
        let mut counterparty = session
            .find_counterparty(id)
            .await?
            .ok_or_else(|| ApplicationError::counterparty_not_found(id))?;

        counterparty.rename(request.nome.clone());

        if !session.update_counterparty(&counterparty).await? {
            return Err(ApplicationError::counterparty_not_found(id));
        }
        session.commit().await?;
        info!(counterparty_id = %id, "counterparty updated");
        Ok(counterparty)
    }

    /// Deletes a counterparty. Entries that referenced it lose the reference.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no counterparty has that id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CounterpartyId) -> ApplicationResult<()> {
        let mut session = self.store.begin().await?;
        if !session.delete_counterparty(id).await? {
            return Err(ApplicationError::counterparty_not_found(id));
        }
        session.commit().await?;
        info!(counterparty_id = %id, "counterparty deleted");
        Ok(())
    }

    /// Returns the entries referencing a counterparty.
    ///
    /// An unknown counterparty simply has no entries.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Repository`] if storage fails.
    #[instrument(skip(self))]
    pub async fn entries_for(&self, id: CounterpartyId) -> ApplicationResult<Vec<EntryDetails>> {
        let mut session = self.store.begin().await?;
        let entries = session.entries_by_counterparty(id).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let counterparty = session.find_counterparty(id).await?;
        Ok(entries
            .into_iter()
            .map(|entry| EntryDetails {
                entry,
                counterparty: counterparty.clone(),
            })
            .collect())
    }
}
