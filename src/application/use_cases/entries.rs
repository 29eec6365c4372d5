//! # Entry Use Cases
//!
//! List, read, create, update and delete ledger entries.
//!
//! Creation checks, in order: the referenced counterparty exists, the due
//! month still has room under the [`MonthlyQuota`], then the field rules of
//! [`validate_new_entry`]. Updates only re-check the counterparty reference
//! and that the kind parses.

use super::abort;
use crate::application::dto::EntryRequest;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{Counterparty, LedgerEntry};
use crate::domain::services::{MonthlyQuota, parse_kind, validate_new_entry};
use crate::domain::value_objects::{CounterpartyId, EntryId};
use crate::infrastructure::persistence::{
    CounterpartyRepository, EntryRepository, Session, Store,
};
use chrono::Datelike;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// An entry together with the counterparty it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    /// The entry.
    pub entry: LedgerEntry,
    /// The referenced counterparty, if any.
    pub counterparty: Option<Counterparty>,
}

/// Ledger entry workflows.
#[derive(Debug, Clone)]
pub struct EntryUseCases {
    store: Arc<dyn Store>,
    quota: MonthlyQuota,
}

impl EntryUseCases {
    /// Creates the use cases over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, quota: MonthlyQuota) -> Self {
        Self { store, quota }
    }

    /// Returns every entry with its counterparty.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Repository`] if storage fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> ApplicationResult<Vec<EntryDetails>> {
        let mut session = self.store.begin().await?;
        let entries = session.list_entries().await?;
        let counterparties: HashMap<CounterpartyId, Counterparty> = session
            .list_counterparties()
            .await?
            .into_iter()
            .map(|c| (c.id(), c))
            .collect();

        Ok(entries
            .into_iter()
            .map(|entry| {
                let counterparty = entry
                    .counterparty_id()
                    .and_then(|id| counterparties.get(&id).cloned());
                EntryDetails {
                    entry,
                    counterparty,
                }
            })
            .collect())
    }

    /// Returns one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no entry has that id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: EntryId) -> ApplicationResult<EntryDetails> {
        let mut session = self.store.begin().await?;
        let entry = session
            .find_entry(id)
            .await?
            .ok_or_else(|| ApplicationError::entry_not_found(id))?;
        details(session.as_mut(), entry).await
    }

    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::NotFound`] if the referenced counterparty does not exist
    /// - [`ApplicationError::Domain`] if the quota or a field rule fails
    /// - [`ApplicationError::Persistence`] if the insert fails
    #[instrument(skip(self, request), fields(data_previsao = %request.data_previsao))]
    pub async fn create(&self, request: &EntryRequest) -> ApplicationResult<EntryDetails> {
        let mut session = self.store.begin().await?;

        let counterparty = resolve_reference(session.as_mut(), request.counterparty_id()).await?;

        let due = request.data_previsao;
        let existing = session.count_entries_due_in(due.year(), due.month()).await?;
        self.quota.check(due.year(), due.month(), existing)?;

        let kind = validate_new_entry(request.valor, &request.descricao, &request.tipo)?;

        let entry = match session.insert_entry(&request.to_draft(kind)).await {
            Ok(entry) => entry,
            Err(e) => return Err(abort(session, ApplicationError::CREATE_ENTRY_FAILED, e).await),
        };
        session
            .commit()
            .await
            .map_err(|e| ApplicationError::persistence(ApplicationError::CREATE_ENTRY_FAILED, e))?;

        info!(entry_id = %entry.id(), "entry created");
        Ok(EntryDetails {
            entry,
            counterparty,
        })
    }

    /// Replaces the editable fields of an entry.
    ///
    /// Settlement data is kept.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::NotFound`] if the entry or the referenced counterparty does not exist
    /// - [`ApplicationError::Domain`] if the kind is unknown
    /// - [`ApplicationError::Persistence`] if the update fails
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: EntryId,
        request: &EntryRequest,
    ) -> ApplicationResult<EntryDetails> {
        let mut session = self.store.begin().await?;

        let mut entry = session
            .find_entry(id)
            .await?
            .ok_or_else(|| ApplicationError::entry_not_found(id))?;
        let counterparty = resolve_reference(session.as_mut(), request.counterparty_id()).await?;
        let kind = parse_kind(&request.tipo)?;

        entry.apply(request.to_draft(kind));

        match session.update_entry(&entry).await {
            Ok(true) => {}
            Ok(false) => return Err(ApplicationError::entry_not_found(id)),
            Err(e) => return Err(abort(session, ApplicationError::UPDATE_ENTRY_FAILED, e).await),
        }
        session
            .commit()
            .await
            .map_err(|e| ApplicationError::persistence(ApplicationError::UPDATE_ENTRY_FAILED, e))?;

        info!(entry_id = %id, "entry updated");
        Ok(EntryDetails {
            entry,
            counterparty,
        })
    }

    /// Deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no entry has that id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntryId) -> ApplicationResult<()> {
        let mut session = self.store.begin().await?;
        if !session.delete_entry(id).await? {
            return Err(ApplicationError::entry_not_found(id));
        }
        session.commit().await?;
        info!(entry_id = %id, "entry deleted");
        Ok(())
    }
}

/// Loads the counterparty an entry request points at.
async fn resolve_reference(
    session: &mut dyn Session,
    id: Option<CounterpartyId>,
) -> ApplicationResult<Option<Counterparty>> {
    let Some(id) = id else {
        return Ok(None);
    };
    session
        .find_counterparty(id)
        .await?
        .map(Some)
        .ok_or_else(|| ApplicationError::referenced_counterparty_not_found(id))
}

/// Attaches the referenced counterparty to a stored entry.
pub(crate) async fn details(
    session: &mut dyn Session,
    entry: LedgerEntry,
) -> ApplicationResult<EntryDetails> {
    let counterparty = match entry.counterparty_id() {
        Some(id) => session.find_counterparty(id).await?,
        None => None,
    };
    Ok(EntryDetails {
        entry,
        counterparty,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::EntryKind;
    use crate::infrastructure::persistence::in_memory::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn request(valor: i64, tipo: &str, day: u32, fornecedor: Option<i64>) -> EntryRequest {
        EntryRequest {
            descricao: "Conta de Teste".to_string(),
            valor: Decimal::from(valor),
            tipo: tipo.to_string(),
            data_previsao: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
            fornecedor_cliente_id: fornecedor,
        }
    }

    fn setup() -> (InMemoryStore, EntryUseCases) {
        let store = InMemoryStore::new();
        let use_cases = EntryUseCases::new(Arc::new(store.clone()), MonthlyQuota::default());
        (store, use_cases)
    }

    async fn add_counterparty(store: &InMemoryStore, name: &str) -> Counterparty {
        let mut session = store.begin().await.unwrap();
        let c = session.insert_counterparty(name).await.unwrap();
        session.commit().await.unwrap();
        c
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let (_, use_cases) = setup();
        let created = use_cases
            .create(&request(100, "Receber", 23, None))
            .await
            .unwrap();

        let fetched = use_cases.get(created.entry.id()).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.entry.kind(), EntryKind::Receivable);
        assert!(!fetched.entry.is_settled());
        assert_eq!(fetched.counterparty, None);
    }

    #[tokio::test]
    async fn create_embeds_counterparty() {
        let (store, use_cases) = setup();
        let c = add_counterparty(&store, "Fornecedor 1").await;
        let created = use_cases
            .create(&request(100, "Pagar", 1, Some(c.id().get())))
            .await
            .unwrap();
        assert_eq!(created.counterparty, Some(c));
    }

    #[tokio::test]
    async fn unknown_counterparty_checked_before_fields() {
        let (_, use_cases) = setup();
        let err = use_cases
            .create(&request(-1, "Outro", 1, Some(42)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(d) if d == "Fornecedor com ID 42"));
    }

    #[tokio::test]
    async fn non_positive_amount_rejected() {
        let (store, use_cases) = setup();
        let err = use_cases
            .create(&request(0, "Pagar", 1, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NonPositiveAmount)
        ));
        assert_eq!(store.entry_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_kind_rejected_on_create() {
        let (_, use_cases) = setup();
        let err = use_cases
            .create(&request(10, "Transferir", 1, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidKind(_))
        ));
    }

    #[tokio::test]
    async fn quota_admits_six_and_rejects_seventh() {
        let (_, use_cases) = setup();
        for day in 1..=6 {
            use_cases
                .create(&request(100, "Pagar", day, None))
                .await
                .unwrap();
        }
        let err = use_cases
            .create(&request(100, "Pagar", 7, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MonthlyQuotaExceeded { month: 5, .. })
        ));
    }

    #[tokio::test]
    async fn quota_is_per_month() {
        let (_, use_cases) = setup();
        for day in 1..=6 {
            use_cases
                .create(&request(100, "Pagar", day, None))
                .await
                .unwrap();
        }
        assert!(use_cases.create(&request(100, "Pagar", 7, None)).await.is_err());

        let mut june = request(100, "Pagar", 1, None);
        june.data_previsao = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(use_cases.create(&june).await.is_ok());
    }

    #[tokio::test]
    async fn failed_insert_rolls_back() {
        let (store, use_cases) = setup();
        store.fail_writes(true);
        let err = use_cases
            .create(&request(100, "Pagar", 1, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Persistence {
                message: "Erro ao criar conta",
                ..
            }
        ));
        store.fail_writes(false);
        assert_eq!(store.entry_count().await, 0);
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let (_, use_cases) = setup();
        let created = use_cases
            .create(&request(100, "Receber", 23, None))
            .await
            .unwrap();

        let mut change = request(250, "Pagar", 30, None);
        change.descricao = "Conta Atualizada".to_string();
        let updated = use_cases
            .update(created.entry.id(), &change)
            .await
            .unwrap();

        assert_eq!(updated.entry.description(), "Conta Atualizada");
        assert_eq!(updated.entry.amount(), Decimal::from(250));
        assert_eq!(updated.entry.kind(), EntryKind::Payable);
        assert_eq!(use_cases.get(created.entry.id()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_skips_amount_rule() {
        let (_, use_cases) = setup();
        let created = use_cases
            .create(&request(100, "Pagar", 1, None))
            .await
            .unwrap();
        let updated = use_cases
            .update(created.entry.id(), &request(-5, "Pagar", 1, None))
            .await
            .unwrap();
        assert_eq!(updated.entry.amount(), Decimal::from(-5));
    }

    #[tokio::test]
    async fn update_missing_entry_is_not_found() {
        let (_, use_cases) = setup();
        let err = use_cases
            .update(EntryId::new(999), &request(1, "Pagar", 1, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(d) if d == "Conta com ID 999"));
    }

    #[tokio::test]
    async fn update_failure_reports_update_message() {
        let (store, use_cases) = setup();
        let created = use_cases
            .create(&request(100, "Pagar", 1, None))
            .await
            .unwrap();
        store.fail_writes(true);
        let err = use_cases
            .update(created.entry.id(), &request(200, "Pagar", 1, None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Erro ao atualizar conta");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (_, use_cases) = setup();
        let created = use_cases
            .create(&request(100, "Pagar", 1, None))
            .await
            .unwrap();
        use_cases.delete(created.entry.id()).await.unwrap();
        assert!(use_cases.get(created.entry.id()).await.unwrap_err().is_not_found());
        assert!(use_cases.delete(created.entry.id()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_resolves_counterparties() {
        let (store, use_cases) = setup();
        let c = add_counterparty(&store, "Cliente A").await;
        use_cases
            .create(&request(1, "Receber", 1, Some(c.id().get())))
            .await
            .unwrap();
        use_cases
            .create(&request(2, "Pagar", 2, None))
            .await
            .unwrap();

        let all = use_cases.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].counterparty.as_ref(), Some(&c));
        assert_eq!(all[1].counterparty, None);
    }
}
