//! # Entry DTOs
//!
//! Request and response bodies of the `/contas-a-pagar-e-receber` resource.
//!
//! Monetary values travel as JSON numbers in both directions.

use super::counterparty_dto::CounterpartyResponse;
use super::validation::{FieldViolation, RequestSchema, check_length};
use crate::domain::entities::ledger_entry::{
    AMOUNT_MAX, DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS,
};
use crate::domain::entities::{Counterparty, EntryDraft, LedgerEntry};
use crate::domain::services::MonthlyTotal;
use crate::domain::value_objects::{CounterpartyId, EntryKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of an entry create or update.
///
/// `tipo` is kept as a raw string so an unknown kind is reported as a
/// business rule failure rather than a schema failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRequest {
    /// Description.
    pub descricao: String,
    /// Amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    /// `Pagar` or `Receber`.
    pub tipo: String,
    /// Due date, `YYYY-MM-DD`.
    pub data_previsao: NaiveDate,
    /// Referenced counterparty.
    #[serde(default)]
    pub fornecedor_cliente_id: Option<i64>,
}

impl EntryRequest {
    /// Builds the draft stored for this request once `tipo` has been parsed.
    #[must_use]
    pub fn to_draft(&self, kind: EntryKind) -> EntryDraft {
        EntryDraft::new(
            self.descricao.clone(),
            self.valor,
            kind,
            self.data_previsao,
            self.counterparty_id(),
        )
    }

    /// Returns the referenced counterparty id.
    #[must_use]
    pub fn counterparty_id(&self) -> Option<CounterpartyId> {
        self.fornecedor_cliente_id.map(CounterpartyId::new)
    }
}

impl RequestSchema for EntryRequest {
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["descricao", "valor", "tipo", "data_previsao"];

    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        check_length(
            "descricao",
            &self.descricao,
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
            &mut violations,
        );
        if self.valor > Decimal::from(AMOUNT_MAX) {
            violations.push(FieldViolation::too_large(
                &["body", "valor"],
                AMOUNT_MAX,
                self.valor,
            ));
        }
        violations
    }
}

impl fmt::Display for EntryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EntryRequest {{ {} {} due {} }}",
            self.tipo, self.valor, self.data_previsao
        )
    }
}

/// An entry as returned to clients, with its counterparty embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryResponse {
    /// Identifier.
    pub id: i64,
    /// Description.
    pub descricao: String,
    /// Amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    /// `Pagar` or `Receber`.
    pub tipo: EntryKind,
    /// Due date.
    pub data_previsao: NaiveDate,
    /// Settlement date.
    pub data_baixa: Option<NaiveDate>,
    /// Settled amount.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub valor_baixada: Option<Decimal>,
    /// Whether the entry has been settled.
    pub esta_baixada: bool,
    /// Referenced counterparty.
    pub fornecedor: Option<CounterpartyResponse>,
}

impl EntryResponse {
    /// Builds a response from an entry and its resolved counterparty.
    #[must_use]
    pub fn new(entry: &LedgerEntry, counterparty: Option<&Counterparty>) -> Self {
        Self {
            id: entry.id().get(),
            descricao: entry.description().to_string(),
            valor: entry.amount(),
            tipo: entry.kind(),
            data_previsao: entry.due_date(),
            data_baixa: entry.settlement_date(),
            valor_baixada: entry.settled_amount(),
            esta_baixada: entry.is_settled(),
            fornecedor: counterparty.map(CounterpartyResponse::from),
        }
    }
}

/// One month of the spending forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Month number (1-12).
    pub mes: u32,
    /// Payable total for the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub valor_total: Decimal,
}

impl From<MonthlyTotal> for ForecastResponse {
    fn from(total: MonthlyTotal) -> Self {
        Self {
            mes: total.month,
            valor_total: total.total,
        }
    }
}
