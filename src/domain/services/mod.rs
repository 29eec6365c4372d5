//! # Domain Services
//!
//! Stateless rules that operate on entities.
//!
//! - [`entry_rules`]: creation field rules and the monthly quota
//! - [`forecast`]: per-month payable totals

pub mod entry_rules;
pub mod forecast;

pub use entry_rules::{MonthlyQuota, parse_kind, validate_new_entry};
pub use forecast::{MonthlyTotal, forecast_by_month};
