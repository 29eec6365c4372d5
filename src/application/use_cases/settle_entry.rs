//! # Settle Entry Use Case
//!
//! Marks an entry as paid or received (baixada) for its full amount.

use super::entries::{EntryDetails, details};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::value_objects::EntryId;
use crate::infrastructure::persistence::{EntryRepository, Store};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, instrument};

/// Use case for settling an entry.
#[derive(Debug, Clone)]
pub struct SettleEntryUseCase {
    store: Arc<dyn Store>,
}

impl SettleEntryUseCase {
    /// Creates the use case over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Settles the entry today, in local time.
    ///
    /// Settling an already-settled entry stamps the new date.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no entry has that id.
    pub async fn execute(&self, id: EntryId) -> ApplicationResult<EntryDetails> {
        self.execute_on(id, Local::now().date_naive()).await
    }

    /// Settles the entry on `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no entry has that id.
    #[instrument(skip(self))]
    pub async fn execute_on(
        &self,
        id: EntryId,
        today: NaiveDate,
    ) -> ApplicationResult<EntryDetails> {
        let mut session = self.store.begin().await?;
        let mut entry = session
            .find_entry(id)
            .await?
            .ok_or_else(|| ApplicationError::entry_not_found(id))?;

        entry.settle(today);

        if !session.update_entry(&entry).await? {
            return Err(ApplicationError::entry_not_found(id));
        }
        let result = details(session.as_mut(), entry).await?;
        session.commit().await?;

        info!(entry_id = %id, settled_on = %today, "entry settled");
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::dto::EntryRequest;
    use crate::application::use_cases::EntryUseCases;
    use crate::domain::services::MonthlyQuota;
    use crate::infrastructure::persistence::in_memory::InMemoryStore;
    use rust_decimal::Decimal;

    async fn setup() -> (SettleEntryUseCase, EntryId) {
        let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
        let entries = EntryUseCases::new(Arc::clone(&store), MonthlyQuota::default());
        let created = entries
            .create(&EntryRequest {
                descricao: "Conta de Teste".to_string(),
                valor: Decimal::new(12050, 2),
                tipo: "Pagar".to_string(),
                data_previsao: NaiveDate::from_ymd_opt(2025, 5, 23).unwrap(),
                fornecedor_cliente_id: None,
            })
            .await
            .unwrap();
        (SettleEntryUseCase::new(store), created.entry.id())
    }

    #[tokio::test]
    async fn settles_full_amount_on_given_day() {
        let (settle, id) = setup().await;
        let day = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let settled = settle.execute_on(id, day).await.unwrap();

        assert!(settled.entry.is_settled());
        assert_eq!(settled.entry.settlement_date(), Some(day));
        assert_eq!(settled.entry.settled_amount(), Some(Decimal::new(12050, 2)));
    }

    #[tokio::test]
    async fn execute_uses_local_today() {
        let (settle, id) = setup().await;
        let settled = settle.execute(id).await.unwrap();
        assert_eq!(
            settled.entry.settlement_date(),
            Some(Local::now().date_naive())
        );
    }

    #[tokio::test]
    async fn settling_again_restamps_date() {
        let (settle, id) = setup().await;
        settle
            .execute_on(id, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
            .await
            .unwrap();
        let again = settle
            .execute_on(id, NaiveDate::from_ymd_opt(2025, 5, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(
            again.entry.settlement_date(),
            NaiveDate::from_ymd_opt(2025, 5, 2)
        );
    }

    #[tokio::test]
    async fn unknown_entry_is_not_found() {
        let (settle, _) = setup().await;
        let err = settle.execute(EntryId::new(999)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
