//! # PostgreSQL Entry Repository
//!
//! [`EntryRepository`] over the `contas_a_pagar_e_receber` table.
//!
//! Month and year filters are expressed as half-open date ranges so the
//! `data_previsao` index can be used. A range whose end lies past the last
//! representable date is left open.

use super::store::PostgresSession;
use crate::domain::entities::{EntryDraft, LedgerEntry};
use crate::domain::value_objects::{CounterpartyId, EntryId, EntryKind};
use crate::infrastructure::persistence::traits::{
    EntryRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

const ENTRY_COLUMNS: &str = "id, descricao, valor, tipo, data_previsao, data_baixa, \
     valor_baixada, esta_baixada, fornecedor_cliente_id";

#[async_trait]
impl EntryRepository for PostgresSession {
    async fn list_entries(&mut self) -> RepositoryResult<Vec<LedgerEntry>> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM contas_a_pagar_e_receber ORDER BY id ASC");
        let rows: Vec<EntryRow> = sqlx::query_as(&sql)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(EntryRow::try_into_entry).collect()
    }

    async fn find_entry(&mut self, id: EntryId) -> RepositoryResult<Option<LedgerEntry>> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM contas_a_pagar_e_receber WHERE id = $1");
        let row: Option<EntryRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(EntryRow::try_into_entry).transpose()
    }

    async fn entries_by_counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> RepositoryResult<Vec<LedgerEntry>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM contas_a_pagar_e_receber \
             WHERE fornecedor_cliente_id = $1 ORDER BY id ASC"
        );
        let rows: Vec<EntryRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(EntryRow::try_into_entry).collect()
    }

    async fn count_entries_due_in(&mut self, year: i32, month: u32) -> RepositoryResult<u64> {
        let (start, end) = month_range(year, month)?;
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contas_a_pagar_e_receber \
             WHERE data_previsao >= $1 AND ($2::DATE IS NULL OR data_previsao < $2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        u64::try_from(count).map_err(|e| RepositoryError::serialization(e.to_string()))
    }

    async fn payables_due_in(&mut self, year: i32) -> RepositoryResult<Vec<LedgerEntry>> {
        let Some((start, end)) = year_range(year) else {
            return Ok(Vec::new());
        };
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM contas_a_pagar_e_receber \
             WHERE tipo = $1 AND data_previsao >= $2 \
             AND ($3::DATE IS NULL OR data_previsao < $3) ORDER BY id ASC"
        );
        let rows: Vec<EntryRow> = sqlx::query_as(&sql)
            .bind(EntryKind::PAYABLE)
            .bind(start)
            .bind(end)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(EntryRow::try_into_entry).collect()
    }

    async fn insert_entry(&mut self, draft: &EntryDraft) -> RepositoryResult<LedgerEntry> {
        let sql = format!(
            "INSERT INTO contas_a_pagar_e_receber \
             (descricao, valor, tipo, data_previsao, fornecedor_cliente_id, esta_baixada) \
             VALUES ($1, $2, $3, $4, $5, FALSE) RETURNING {ENTRY_COLUMNS}"
        );
        let row: EntryRow = sqlx::query_as(&sql)
            .bind(&draft.description)
            .bind(draft.amount)
            .bind(draft.kind.as_str())
            .bind(draft.due_date)
            .bind(draft.counterparty_id.map(CounterpartyId::get))
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.try_into_entry()
    }

    async fn update_entry(&mut self, entry: &LedgerEntry) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE contas_a_pagar_e_receber SET
                descricao = $2,
                valor = $3,
                tipo = $4,
                data_previsao = $5,
                data_baixa = $6,
                valor_baixada = $7,
                esta_baixada = $8,
                fornecedor_cliente_id = $9
            WHERE id = $1
            "#,
        )
        .bind(entry.id().get())
        .bind(entry.description())
        .bind(entry.amount())
        .bind(entry.kind().as_str())
        .bind(entry.due_date())
        .bind(entry.settlement_date())
        .bind(entry.settled_amount())
        .bind(entry.is_settled())
        .bind(entry.counterparty_id().map(CounterpartyId::get))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_entry(&mut self, id: EntryId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM contas_a_pagar_e_receber WHERE id = $1")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// First day of the month and, if representable, of the following month.
fn month_range(year: i32, month: u32) -> RepositoryResult<(NaiveDate, Option<NaiveDate>)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| RepositoryError::query(format!("invalid month {year}-{month}")))?;
    Ok((start, start.checked_add_months(Months::new(1))))
}

/// January 1st of `year` and, if representable, of the following year.
///
/// `None` when `year` itself has no representable dates, so nothing can be
/// due in it.
fn year_range(year: i32) -> Option<(NaiveDate, Option<NaiveDate>)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    Some((start, start.checked_add_months(Months::new(12))))
}

/// Row type for entry queries.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: i64,
    descricao: String,
    valor: Decimal,
    tipo: String,
    data_previsao: NaiveDate,
    data_baixa: Option<NaiveDate>,
    valor_baixada: Option<Decimal>,
    esta_baixada: Option<bool>,
    fornecedor_cliente_id: Option<i64>,
}

impl EntryRow {
    fn try_into_entry(self) -> RepositoryResult<LedgerEntry> {
        let kind = self
            .tipo
            .parse::<EntryKind>()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        LedgerEntry::from_stored(
            EntryId::new(self.id),
            self.descricao,
            self.valor,
            kind,
            self.data_previsao,
            self.data_baixa,
            self.valor_baixada,
            self.esta_baixada,
            self.fornecedor_cliente_id.map(CounterpartyId::new),
        )
        .map_err(|e| RepositoryError::serialization(e.to_string()))
    }
}
