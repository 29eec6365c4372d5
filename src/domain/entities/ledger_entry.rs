//! # Ledger Entry Entity
//!
//! A payable or receivable (conta) with a due date, optionally tied to a
//! counterparty, which can be settled (baixada).
//!
//! # Invariants
//!
//! - A settled entry always carries both a settlement date and a settled amount.
//! - Settlement is one-way: there is no operation that unsettles an entry.
//! - Settling an already-settled entry re-stamps the settlement date.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use contas_api::domain::entities::{EntryDraft, LedgerEntry};
//! use contas_api::domain::value_objects::{EntryId, EntryKind};
//! use rust_decimal::Decimal;
//!
//! let draft = EntryDraft::new(
//!     "Aluguel",
//!     Decimal::new(150000, 2),
//!     EntryKind::Payable,
//!     NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
//!     None,
//! );
//! let mut entry = LedgerEntry::from_draft(EntryId::new(1), draft);
//! assert!(!entry.is_settled());
//!
//! entry.settle(NaiveDate::from_ymd_opt(2025, 5, 9).unwrap());
//! assert!(entry.is_settled());
//! assert_eq!(entry.settled_amount(), Some(Decimal::new(150000, 2)));
//! ```

use crate::domain::value_objects::{CounterpartyId, EntryId, EntryKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of an entry description, in characters.
pub const DESCRIPTION_MIN_CHARS: usize = 3;

/// Maximum length of an entry description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// Largest amount a client may submit, in whole currency units.
///
/// Keeps yearly and monthly sums far inside `Decimal`'s range.
pub const AMOUNT_MAX: i64 = 1_000_000_000_000_000;

/// The client-editable fields of an entry.
///
/// Used both to create an entry and to replace all editable fields of an
/// existing one. Settlement fields are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Free-text description.
    pub description: String,
    /// Amount due.
    pub amount: Decimal,
    /// Payable or receivable.
    pub kind: EntryKind,
    /// Expected payment date.
    pub due_date: NaiveDate,
    /// Referenced counterparty, if any.
    pub counterparty_id: Option<CounterpartyId>,
}

impl EntryDraft {
    /// Creates a draft.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: EntryKind,
        due_date: NaiveDate,
        counterparty_id: Option<CounterpartyId>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            due_date,
            counterparty_id,
        }
    }
}

/// Settlement data of a settled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Day the entry was settled.
    pub date: NaiveDate,
    /// Amount settled (always the full entry amount).
    pub amount: Decimal,
}

/// Error returned when stored settlement columns contradict each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InconsistentSettlementError(pub EntryId);

impl fmt::Display for InconsistentSettlementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} is marked settled without settlement date and amount",
            self.0
        )
    }
}

impl std::error::Error for InconsistentSettlementError {}

/// A ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    id: EntryId,
    description: String,
    amount: Decimal,
    kind: EntryKind,
    due_date: NaiveDate,
    settlement: Option<Settlement>,
    counterparty_id: Option<CounterpartyId>,
}

impl LedgerEntry {
    /// Builds a fresh, unsettled entry from a draft and a store-assigned id.
    #[must_use]
    pub fn from_draft(id: EntryId, draft: EntryDraft) -> Self {
        Self {
            id,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            due_date: draft.due_date,
            settlement: None,
            counterparty_id: draft.counterparty_id,
        }
    }

    /// Rebuilds an entry from stored columns.
    ///
    /// A missing `is_settled` flag reads as unsettled.
    ///
    /// # Errors
    ///
    /// Returns [`InconsistentSettlementError`] if the entry is flagged as
    /// settled but lacks the settlement date or amount.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        id: EntryId,
        description: String,
        amount: Decimal,
        kind: EntryKind,
        due_date: NaiveDate,
        settlement_date: Option<NaiveDate>,
        settled_amount: Option<Decimal>,
        is_settled: Option<bool>,
        counterparty_id: Option<CounterpartyId>,
    ) -> Result<Self, InconsistentSettlementError> {
        let settlement = match (is_settled.unwrap_or(false), settlement_date, settled_amount) {
            (true, Some(date), Some(amount)) => Some(Settlement { date, amount }),
            (true, _, _) => return Err(InconsistentSettlementError(id)),
            (false, _, _) => None,
        };

        Ok(Self {
            id,
            description,
            amount,
            kind,
            due_date,
            settlement,
            counterparty_id,
        })
    }

    // ========== Accessors ==========

    /// Returns the entry ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the due date.
    #[inline]
    #[must_use]
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the settlement, if settled.
    #[inline]
    #[must_use]
    pub fn settlement(&self) -> Option<Settlement> {
        self.settlement
    }

    /// Returns the settlement date, if settled.
    #[inline]
    #[must_use]
    pub fn settlement_date(&self) -> Option<NaiveDate> {
        self.settlement.map(|s| s.date)
    }

    /// Returns the settled amount, if settled.
    #[inline]
    #[must_use]
    pub fn settled_amount(&self) -> Option<Decimal> {
        self.settlement.map(|s| s.amount)
    }

    /// Returns true once the entry has been settled.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settlement.is_some()
    }

    /// Returns the referenced counterparty, if any.
    #[inline]
    #[must_use]
    pub fn counterparty_id(&self) -> Option<CounterpartyId> {
        self.counterparty_id
    }

    /// Returns true if the due date falls in the given year and month.
    #[must_use]
    pub fn is_due_in(&self, year: i32, month: u32) -> bool {
        self.due_date.year() == year && self.due_date.month() == month
    }

    // ========== Mutations ==========

    /// Settles the full amount on `today`.
    ///
    /// Calling this on a settled entry re-stamps the date and amount.
    pub fn settle(&mut self, today: NaiveDate) {
        self.settlement = Some(Settlement {
            date: today,
            amount: self.amount,
        });
    }

    /// Replaces every editable field with the draft's values.
    ///
    /// Settlement data is left untouched.
    pub fn apply(&mut self, draft: EntryDraft) {
        self.description = draft.description;
        self.amount = draft.amount;
        self.kind = draft.kind;
        self.due_date = draft.due_date;
        self.counterparty_id = draft.counterparty_id;
    }

    /// Drops the counterparty reference.
    pub fn detach_counterparty(&mut self) {
        self.counterparty_id = None;
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LedgerEntry({} {} {} due {})",
            self.id, self.kind, self.amount, self.due_date
        )
    }
}
