//! # Identity Value Objects
//!
//! Type-safe identity wrappers for domain identifiers.
//!
//! Both identifiers are integers assigned by the store on insert. Wrapping
//! them keeps an entry id from being passed where a counterparty id is
//! expected.
//!
//! - [`EntryId`] - Ledger entry (conta) identifier
//! - [`CounterpartyId`] - Counterparty (fornecedor/cliente) identifier

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ledger entry identifier.
///
/// # Examples
///
/// ```
/// use contas_api::domain::value_objects::ids::EntryId;
///
/// let id = EntryId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Creates an entry ID from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Counterparty identifier.
///
/// # Examples
///
/// ```
/// use contas_api::domain::value_objects::ids::CounterpartyId;
///
/// let id: CounterpartyId = "7".parse().unwrap();
/// assert_eq!(id, CounterpartyId::new(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterpartyId(i64);

impl CounterpartyId {
    /// Creates a counterparty ID from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CounterpartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CounterpartyId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for CounterpartyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
