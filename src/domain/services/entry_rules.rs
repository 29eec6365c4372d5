//! # Entry Rules
//!
//! Business checks applied when an entry is created.
//!
//! Field rules run in a fixed order (amount, description, kind) and the first
//! failing rule is reported. The monthly quota is checked separately because
//! it needs a count from the store.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::EntryKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caps how many entries may be due in one calendar month.
///
/// The check fails only when the month already holds *more* than `limit`
/// entries, so with a limit of 5 the sixth entry of a month is still
/// accepted and the seventh is rejected.
///
/// # Examples
///
/// ```
/// use contas_api::domain::services::MonthlyQuota;
///
/// let quota = MonthlyQuota::default();
/// assert!(quota.check(2025, 5, 5).is_ok());
/// assert!(quota.check(2025, 5, 6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyQuota {
    limit: u64,
}

impl MonthlyQuota {
    /// Limit used when none is configured.
    pub const DEFAULT_LIMIT: u64 = 5;

    /// Creates a quota with the given limit.
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// Returns the configured limit.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Checks the number of entries already due in `year`/`month`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MonthlyQuotaExceeded`] when `existing` is
    /// greater than the limit.
    pub fn check(&self, year: i32, month: u32, existing: u64) -> DomainResult<()> {
        if existing > self.limit {
            return Err(DomainError::MonthlyQuotaExceeded {
                year,
                month,
                limit: self.limit,
            });
        }
        Ok(())
    }
}

impl Default for MonthlyQuota {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

/// Parses a wire kind name.
///
/// # Errors
///
/// Returns [`DomainError::InvalidKind`] for anything other than `Pagar` or
/// `Receber`.
pub fn parse_kind(raw: &str) -> DomainResult<EntryKind> {
    raw.parse().map_err(|_| DomainError::InvalidKind(raw.to_string()))
}

/// Applies the field rules of a new entry and returns the parsed kind.
///
/// # Errors
///
/// - [`DomainError::NonPositiveAmount`] if `amount <= 0`
/// - [`DomainError::EmptyDescription`] if `description` is blank
/// - [`DomainError::InvalidKind`] if `kind` is not a known kind
pub fn validate_new_entry(
    amount: Decimal,
    description: &str,
    kind: &str,
) -> DomainResult<EntryKind> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::NonPositiveAmount);
    }
    if description.trim().is_empty() {
        return Err(DomainError::EmptyDescription);
    }
    parse_kind(kind)
}
