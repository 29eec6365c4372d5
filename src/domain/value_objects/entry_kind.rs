//! # Entry Kind
//!
//! Closed classification of a ledger entry: money going out (payable) or
//! coming in (receivable).
//!
//! On the wire and in storage the kinds are spelled `Pagar` and `Receber`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an entry is to be paid or to be received.
///
/// # Examples
///
/// ```
/// use contas_api::domain::value_objects::EntryKind;
///
/// let kind: EntryKind = "Pagar".parse().unwrap();
/// assert!(kind.is_payable());
/// assert_eq!(kind.as_str(), "Pagar");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Accounts payable.
    #[serde(rename = "Pagar")]
    Payable,
    /// Accounts receivable.
    #[serde(rename = "Receber")]
    Receivable,
}

impl EntryKind {
    /// Wire name of the payable kind.
    pub const PAYABLE: &'static str = "Pagar";
    /// Wire name of the receivable kind.
    pub const RECEIVABLE: &'static str = "Receber";

    /// Returns the wire/storage name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payable => Self::PAYABLE,
            Self::Receivable => Self::RECEIVABLE,
        }
    }

    /// Returns true for payables.
    #[inline]
    #[must_use]
    pub const fn is_payable(&self) -> bool {
        matches!(self, Self::Payable)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names neither kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntryKindError(pub String);

impl fmt::Display for ParseEntryKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entry kind: {}", self.0)
    }
}

impl std::error::Error for ParseEntryKindError {}

impl FromStr for EntryKind {
    type Err = ParseEntryKindError;

    /// Matching is exact: `"pagar"` is not a kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PAYABLE => Ok(Self::Payable),
            Self::RECEIVABLE => Ok(Self::Receivable),
            other => Err(ParseEntryKindError(other.to_string())),
        }
    }
}
