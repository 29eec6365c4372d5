//! # Contas API
//!
//! Accounts payable and receivable ledger service.
//!
//! Entries (contas) are payables or receivables with a due date, optionally
//! linked to a counterparty (fornecedor/cliente). An entry can be settled,
//! each due month holds a limited number of entries, and payables can be
//! summed per month into a spending forecast.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain`): entities, value objects and business rules
//! - **Application Layer** (`application`): use cases and DTOs
//! - **Infrastructure Layer** (`infrastructure`): PostgreSQL and in-memory storage
//! - **API Layer** (`api`): REST interface
//!
//! ## Example
//!
//! ```rust,ignore
//! use contas_api::api::rest::{AppState, create_router};
//! use contas_api::domain::services::MonthlyQuota;
//! use contas_api::infrastructure::persistence::in_memory::InMemoryStore;
//!
//! let state = AppState::new(Arc::new(InMemoryStore::new()), MonthlyQuota::default());
//! let router = create_router(Arc::new(state), &RestConfig::default());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
