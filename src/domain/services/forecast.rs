//! # Spending Forecast
//!
//! Sums payable amounts per calendar month of a given year.
//!
//! Receivables are ignored, as are entries whose due date falls outside the
//! requested year. Months without payables do not appear in the output.

use crate::domain::entities::LedgerEntry;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Total payable amount due in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Month number (1-12).
    pub month: u32,
    /// Sum of payable amounts due that month.
    pub total: Decimal,
}

impl fmt::Display for MonthlyTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}: {}", self.month, self.total)
    }
}

/// Groups the payables of `year` by due month and sums their amounts.
///
/// Output is ordered by month.
///
/// # Errors
///
/// Returns [`DomainError::ForecastOverflow`] if a month's total does not fit
/// in a `Decimal`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use contas_api::domain::entities::{EntryDraft, LedgerEntry};
/// use contas_api::domain::services::forecast::forecast_by_month;
/// use contas_api::domain::value_objects::{EntryId, EntryKind};
/// use rust_decimal::Decimal;
///
/// let entries: Vec<LedgerEntry> = (0..3)
///     .map(|i| {
///         LedgerEntry::from_draft(
///             EntryId::new(i),
///             EntryDraft::new(
///                 "Luz",
///                 Decimal::from(100 + i),
///                 EntryKind::Payable,
///                 NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
///                 None,
///             ),
///         )
///     })
///     .collect();
///
/// let totals = forecast_by_month(&entries, 2025).unwrap();
/// assert_eq!(totals.len(), 1);
/// assert_eq!(totals[0].month, 5);
/// assert_eq!(totals[0].total, Decimal::from(303));
/// ```
pub fn forecast_by_month(
    entries: &[LedgerEntry],
    year: i32,
) -> DomainResult<Vec<MonthlyTotal>> {
    let mut by_month: BTreeMap<u32, Decimal> = BTreeMap::new();

    for entry in entries
        .iter()
        .filter(|e| e.kind().is_payable() && e.due_date().year() == year)
    {
        let month = entry.due_date().month();
        let total = by_month.entry(month).or_default();
        *total = total
            .checked_add(entry.amount())
            .ok_or(DomainError::ForecastOverflow { month })?;
    }

    Ok(by_month
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect())
}
