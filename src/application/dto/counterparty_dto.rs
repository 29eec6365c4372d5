//! # Counterparty DTOs
//!
//! Request and response bodies of the `/fornecedor-cliente` resource.

use super::validation::{FieldViolation, RequestSchema, check_length};
use crate::domain::entities::Counterparty;
use crate::domain::entities::counterparty::{NAME_MAX_CHARS, NAME_MIN_CHARS};
use serde::{Deserialize, Serialize};

/// Body of a counterparty create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyRequest {
    /// Counterparty name.
    pub nome: String,
}

impl CounterpartyRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(nome: impl Into<String>) -> Self {
        Self { nome: nome.into() }
    }
}

impl RequestSchema for CounterpartyRequest {
    const REQUIRED_FIELDS: &'static [&'static str] = &["nome"];

    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        check_length(
            "nome",
            &self.nome,
            NAME_MIN_CHARS,
            NAME_MAX_CHARS,
            &mut violations,
        );
        violations
    }
}

/// A counterparty as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyResponse {
    /// Identifier.
    pub id: i64,
    /// Name.
    pub nome: String,
}

impl From<&Counterparty> for CounterpartyResponse {
    fn from(counterparty: &Counterparty) -> Self {
        Self {
            id: counterparty.id().get(),
            nome: counterparty.name().to_string(),
        }
    }
}

impl From<Counterparty> for CounterpartyResponse {
    fn from(counterparty: Counterparty) -> Self {
        Self::from(&counterparty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CounterpartyId;

    #[test]
    fn short_name_is_a_violation() {
        let violations = CounterpartyRequest::new("F").violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].loc, vec!["body", "nome"]);
    }

    #[test]
    fn three_char_name_is_accepted() {
        assert!(CounterpartyRequest::new("Abc").violations().is_empty());
    }

    #[test]
    fn response_from_entity() {
        let c = Counterparty::new(CounterpartyId::new(7), "Fornecedor 1");
        let r = CounterpartyResponse::from(&c);
        assert_eq!(r.id, 7);
        assert_eq!(r.nome, "Fornecedor 1");
    }
}
