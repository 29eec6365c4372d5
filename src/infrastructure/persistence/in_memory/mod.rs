//! # In-Memory Persistence
//!
//! Store used in development and tests.

pub mod store;

pub use store::{InMemorySession, InMemoryStore};
