//! # Counterparty Entity
//!
//! A supplier or customer (fornecedor/cliente) that ledger entries may
//! reference.
//!
//! # Examples
//!
//! ```
//! use contas_api::domain::entities::Counterparty;
//! use contas_api::domain::value_objects::CounterpartyId;
//!
//! let mut counterparty = Counterparty::new(CounterpartyId::new(1), "Fornecedor 1");
//! counterparty.rename("Fornecedor Atualizado");
//!
//! assert_eq!(counterparty.name(), "Fornecedor Atualizado");
//! ```

use crate::domain::value_objects::CounterpartyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of a counterparty name, in characters.
pub const NAME_MIN_CHARS: usize = 3;

/// Maximum length of a counterparty name, in characters.
pub const NAME_MAX_CHARS: usize = 255;

/// A registered supplier or customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    id: CounterpartyId,
    name: String,
}

impl Counterparty {
    /// Creates a counterparty from a stored identifier and name.
    #[must_use]
    pub fn new(id: CounterpartyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> CounterpartyId {
        self.id
    }

    /// Returns the name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counterparty({}, {})", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_keeps_id() {
        let mut c = Counterparty::new(CounterpartyId::new(4), "Acme");
        c.rename("Acme Ltda");
        assert_eq!(c.id(), CounterpartyId::new(4));
        assert_eq!(c.name(), "Acme Ltda");
    }

    #[test]
    fn display_includes_id_and_name() {
        let c = Counterparty::new(CounterpartyId::new(2), "Loja");
        assert_eq!(c.to_string(), "Counterparty(2, Loja)");
    }
}
