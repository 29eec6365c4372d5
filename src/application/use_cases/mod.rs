//! # Use Cases
//!
//! Application use cases implementing the ledger workflows.
//!
//! Every call opens one session on the injected [`Store`], performs its reads
//! and writes through it and commits at the end. Returning early drops the
//! session, which discards anything it staged.
//!
//! [`Store`]: crate::infrastructure::persistence::Store

pub mod counterparties;
pub mod entries;
pub mod forecast;
pub mod settle_entry;

pub use counterparties::CounterpartyUseCases;
pub use entries::{EntryDetails, EntryUseCases};
pub use forecast::ForecastUseCase;
pub use settle_entry::SettleEntryUseCase;

use crate::application::error::ApplicationError;
use crate::infrastructure::persistence::{RepositoryError, Session};
use tracing::{error, warn};

/// Rolls `session` back after a failed write and builds the error reported
/// to the caller.
async fn abort(
    session: Box<dyn Session>,
    message: &'static str,
    source: RepositoryError,
) -> ApplicationError {
    error!(error = %source, "{message}");
    if let Err(e) = session.rollback().await {
        warn!(error = %e, "rollback failed");
    }
    ApplicationError::persistence(message, source)
}
