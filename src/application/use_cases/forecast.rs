//! # Forecast Use Case
//!
//! Per-month payable totals for one year.

use crate::application::error::ApplicationResult;
use crate::domain::services::{MonthlyTotal, forecast_by_month};
use crate::infrastructure::persistence::{EntryRepository, Store};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Use case for the yearly spending forecast.
#[derive(Debug, Clone)]
pub struct ForecastUseCase {
    store: Arc<dyn Store>,
}

impl ForecastUseCase {
    /// Creates the use case over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Returns the payable totals of `year`, one item per month that has any.
    ///
    /// # Errors
    ///
    /// Returns [`crate::application::ApplicationError::Repository`] if
    /// storage fails and [`crate::application::ApplicationError::Domain`] if
    /// a month's total overflows.
    #[instrument(skip(self))]
    pub async fn execute(&self, year: i32) -> ApplicationResult<Vec<MonthlyTotal>> {
        let mut session = self.store.begin().await?;
        let payables = session.payables_due_in(year).await?;
        let totals = forecast_by_month(&payables, year)?;
        debug!(payables = payables.len(), months = totals.len(), "forecast computed");
        Ok(totals)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::dto::EntryRequest;
    use crate::application::use_cases::EntryUseCases;
    use crate::domain::entities::EntryDraft;
    use crate::domain::errors::DomainError;
    use crate::domain::services::MonthlyQuota;
    use crate::domain::value_objects::EntryKind;
    use crate::infrastructure::persistence::in_memory::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn request(valor: i64, tipo: &str, y: i32, m: u32, d: u32) -> EntryRequest {
        EntryRequest {
            descricao: "Conta".to_string(),
            valor: Decimal::from(valor),
            tipo: tipo.to_string(),
            data_previsao: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            fornecedor_cliente_id: None,
        }
    }

    #[tokio::test]
    async fn sums_payables_of_year_by_month() {
        let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
        let entries = EntryUseCases::new(Arc::clone(&store), MonthlyQuota::default());
        for (i, day) in (1..=6).enumerate() {
            entries
                .create(&request(100 + i as i64, "Pagar", 2025, 5, day))
                .await
                .unwrap();
        }
        entries
            .create(&request(999, "Receber", 2025, 3, 10))
            .await
            .unwrap();
        entries
            .create(&request(40, "Pagar", 2025, 2, 1))
            .await
            .unwrap();
        entries
            .create(&request(77, "Pagar", 2024, 5, 1))
            .await
            .unwrap();

        let totals = ForecastUseCase::new(store).execute(2025).await.unwrap();
        assert_eq!(
            totals,
            vec![
                MonthlyTotal {
                    month: 2,
                    total: Decimal::from(40)
                },
                MonthlyTotal {
                    month: 5,
                    total: Decimal::from(615)
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_store_yields_empty_forecast() {
        let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
        let totals = ForecastUseCase::new(store).execute(2025).await.unwrap();
        assert!(totals.is_empty());
    }

    #[tokio::test]
    async fn overflowing_stored_totals_are_reported() {
        let memory = InMemoryStore::new();
        let mut session = memory.begin().await.unwrap();
        for _ in 0..2 {
            session
                .insert_entry(&EntryDraft::new(
                    "Conta",
                    Decimal::MAX,
                    EntryKind::Payable,
                    NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
                    None,
                ))
                .await
                .unwrap();
        }
        session.commit().await.unwrap();

        let err = ForecastUseCase::new(Arc::new(memory))
            .execute(2025)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::ForecastOverflow { month: 5 })
        ));
    }
}
