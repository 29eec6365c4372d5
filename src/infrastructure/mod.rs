//! # Infrastructure Layer
//!
//! Adapters implementing the storage ports.
//!
//! ## Persistence
//!
//! - PostgreSQL store (one transaction per session)
//! - In-memory store for development and tests

pub mod persistence;
