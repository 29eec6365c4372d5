//! # Value Objects
//!
//! Small immutable types with validation and domain semantics.
//!
//! - [`EntryId`], [`CounterpartyId`]: integer identifiers assigned by the store
//! - [`EntryKind`]: payable or receivable

pub mod entry_kind;
pub mod ids;

pub use entry_kind::{EntryKind, ParseEntryKindError};
pub use ids::{CounterpartyId, EntryId};
