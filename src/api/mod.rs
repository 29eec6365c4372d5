//! # API Layer
//!
//! HTTP interface of the ledger service.
//!
//! ## Resources
//!
//! - `/contas-a-pagar-e-receber`: entries, settlement and the spending forecast
//! - `/fornecedor-cliente`: counterparties and their entries
//!
//! ## Middleware
//!
//! - Request logging and request id propagation

pub mod middleware;
pub mod rest;
