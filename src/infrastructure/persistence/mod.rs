//! # Persistence Layer
//!
//! Repository traits and their PostgreSQL and in-memory implementations.

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    CounterpartyRepository, EntryRepository, RepositoryError, RepositoryResult, Session, Store,
};
