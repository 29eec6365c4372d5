//! # Application Layer
//!
//! Use case orchestration between the HTTP surface and storage.
//!
//! ## Use Cases
//!
//! - [`CounterpartyUseCases`]: counterparty CRUD and entries by counterparty
//! - [`EntryUseCases`]: entry CRUD with creation rules and the monthly quota
//! - [`SettleEntryUseCase`]: marks an entry as settled
//! - [`ForecastUseCase`]: per-month payable totals for a year

pub mod dto;
pub mod error;
pub mod use_cases;

pub use dto::{
    CounterpartyRequest, CounterpartyResponse, EntryRequest, EntryResponse, FieldViolation,
    ForecastResponse,
};
pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{
    CounterpartyUseCases, EntryDetails, EntryUseCases, ForecastUseCase, SettleEntryUseCase,
};
