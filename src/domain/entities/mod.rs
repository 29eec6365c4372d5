//! # Domain Entities
//!
//! - [`Counterparty`]: supplier or customer
//! - [`LedgerEntry`]: payable or receivable with settlement lifecycle
//! - [`EntryDraft`]: editable fields used on create and full update

pub mod counterparty;
pub mod ledger_entry;

pub use counterparty::Counterparty;
pub use ledger_entry::{EntryDraft, InconsistentSettlementError, LedgerEntry, Settlement};
