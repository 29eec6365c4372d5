//! # PostgreSQL Counterparty Repository
//!
//! [`CounterpartyRepository`] over the `fornecedor_cliente` table.

use super::store::PostgresSession;
use crate::domain::entities::Counterparty;
use crate::domain::value_objects::CounterpartyId;
use crate::infrastructure::persistence::traits::{
    CounterpartyRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;

#[async_trait]
impl CounterpartyRepository for PostgresSession {
    async fn list_counterparties(&mut self) -> RepositoryResult<Vec<Counterparty>> {
        let rows: Vec<CounterpartyRow> =
            sqlx::query_as("SELECT id, nome FROM fornecedor_cliente ORDER BY id ASC")
                .fetch_all(&mut *self.tx)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(rows.into_iter().map(CounterpartyRow::into_counterparty).collect())
    }

    async fn find_counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> RepositoryResult<Option<Counterparty>> {
        let row: Option<CounterpartyRow> =
            sqlx::query_as("SELECT id, nome FROM fornecedor_cliente WHERE id = $1")
                .bind(id.get())
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(row.map(CounterpartyRow::into_counterparty))
    }

    async fn insert_counterparty(&mut self, name: &str) -> RepositoryResult<Counterparty> {
        let row: CounterpartyRow =
            sqlx::query_as("INSERT INTO fornecedor_cliente (nome) VALUES ($1) RETURNING id, nome")
                .bind(name)
                .fetch_one(&mut *self.tx)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(row.into_counterparty())
    }

    async fn update_counterparty(&mut self, counterparty: &Counterparty) -> RepositoryResult<bool> {
        let result = sqlx::query("UPDATE fornecedor_cliente SET nome = $2 WHERE id = $1")
            .bind(counterparty.id().get())
            .bind(counterparty.name())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_counterparty(&mut self, id: CounterpartyId) -> RepositoryResult<bool> {
        // Entry references are cleared by ON DELETE SET NULL.
        let result = sqlx::query("DELETE FROM fornecedor_cliente WHERE id = $1")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Row type for counterparty queries.
#[derive(Debug, sqlx::FromRow)]
struct CounterpartyRow {
    id: i64,
    nome: String,
}

impl CounterpartyRow {
    fn into_counterparty(self) -> Counterparty {
        Counterparty::new(CounterpartyId::new(self.id), self.nome)
    }
}
