//! # Data Transfer Objects
//!
//! Request and response bodies, decoupling the HTTP wire format from the
//! domain types, plus the structural checks run on decoded requests.

pub mod counterparty_dto;
pub mod entry_dto;
pub mod validation;

pub use counterparty_dto::{CounterpartyRequest, CounterpartyResponse};
pub use entry_dto::{EntryRequest, EntryResponse, ForecastResponse};
pub use validation::{FieldViolation, RequestSchema};
