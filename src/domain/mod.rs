//! # Domain Layer
//!
//! Core ledger rules, independent of HTTP and storage.
//!
//! - **Entities**: [`entities::Counterparty`], [`entities::LedgerEntry`]
//! - **Value Objects**: identifiers and the entry kind
//! - **Services**: creation rules, the monthly quota and the spending forecast
//! - **Errors**: domain rule violations

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
