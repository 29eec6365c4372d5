//! # In-Memory Store
//!
//! In-memory implementation of [`Store`] for development and tests.
//!
//! A session takes the store lock for its whole lifetime and works on a
//! staged copy of the tables. Commit swaps the copy in; dropping the session
//! leaves the tables as they were.
//!
//! Test builds can make writes fail to exercise rollback paths.

use crate::domain::entities::{Counterparty, EntryDraft, LedgerEntry};
use crate::domain::value_objects::{CounterpartyId, EntryId};
use crate::infrastructure::persistence::traits::{
    CounterpartyRepository, EntryRepository, RepositoryResult, Session, Store,
};
use async_trait::async_trait;
use chrono::Datelike;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[cfg(test)]
use crate::infrastructure::persistence::traits::RepositoryError;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
struct Tables {
    counterparties: BTreeMap<CounterpartyId, Counterparty>,
    entries: BTreeMap<EntryId, LedgerEntry>,
    next_counterparty_id: i64,
    next_entry_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            counterparties: BTreeMap::new(),
            entries: BTreeMap::new(),
            next_counterparty_id: 1,
            next_entry_id: 1,
        }
    }
}

/// In-memory implementation of [`Store`].
///
/// Cloning yields a handle to the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    #[cfg(test)]
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent insert and update fail with
    /// [`RepositoryError::Unavailable`] until switched off again.
    #[cfg(test)]
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of committed entries.
    pub async fn entry_count(&self) -> usize {
        self.tables.lock().await.entries.len()
    }

    /// Returns the number of committed counterparties.
    pub async fn counterparty_count(&self) -> usize {
        self.tables.lock().await.counterparties.len()
    }

    /// Clears all data and resets id sequences.
    pub async fn clear(&self) {
        *self.tables.lock().await = Tables::default();
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn begin(&self) -> RepositoryResult<Box<dyn Session>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemorySession {
            guard,
            staged,
            #[cfg(test)]
            fail_writes: Arc::clone(&self.fail_writes),
        }))
    }
}

/// A session over an [`InMemoryStore`].
#[derive(Debug)]
pub struct InMemorySession {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
    #[cfg(test)]
    fail_writes: Arc<AtomicBool>,
}

impl InMemorySession {
    #[cfg(test)]
    fn check_writable(&self) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("writes disabled"));
        }
        Ok(())
    }

    #[cfg(not(test))]
    #[allow(clippy::unused_self)]
    fn check_writable(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CounterpartyRepository for InMemorySession {
    async fn list_counterparties(&mut self) -> RepositoryResult<Vec<Counterparty>> {
        Ok(self.staged.counterparties.values().cloned().collect())
    }

    async fn find_counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> RepositoryResult<Option<Counterparty>> {
        Ok(self.staged.counterparties.get(&id).cloned())
    }

    async fn insert_counterparty(&mut self, name: &str) -> RepositoryResult<Counterparty> {
        self.check_writable()?;
        let id = CounterpartyId::new(self.staged.next_counterparty_id);
        self.staged.next_counterparty_id += 1;
        let counterparty = Counterparty::new(id, name);
        self.staged.counterparties.insert(id, counterparty.clone());
        Ok(counterparty)
    }

    async fn update_counterparty(&mut self, counterparty: &Counterparty) -> RepositoryResult<bool> {
        self.check_writable()?;
        match self.staged.counterparties.get_mut(&counterparty.id()) {
            Some(stored) => {
                *stored = counterparty.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_counterparty(&mut self, id: CounterpartyId) -> RepositoryResult<bool> {
        if self.staged.counterparties.remove(&id).is_none() {
            return Ok(false);
        }
        for entry in self.staged.entries.values_mut() {
            if entry.counterparty_id() == Some(id) {
                entry.detach_counterparty();
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl EntryRepository for InMemorySession {
    async fn list_entries(&mut self) -> RepositoryResult<Vec<LedgerEntry>> {
        Ok(self.staged.entries.values().cloned().collect())
    }

    async fn find_entry(&mut self, id: EntryId) -> RepositoryResult<Option<LedgerEntry>> {
        Ok(self.staged.entries.get(&id).cloned())
    }

    async fn entries_by_counterparty(
        &mut self,
        id: CounterpartyId,
    ) -> RepositoryResult<Vec<LedgerEntry>> {
        Ok(self
            .staged
            .entries
            .values()
            .filter(|e| e.counterparty_id() == Some(id))
            .cloned()
            .collect())
    }

    async fn count_entries_due_in(&mut self, year: i32, month: u32) -> RepositoryResult<u64> {
        let count = self
            .staged
            .entries
            .values()
            .filter(|e| e.is_due_in(year, month))
            .count();
        Ok(count as u64)
    }

    async fn payables_due_in(&mut self, year: i32) -> RepositoryResult<Vec<LedgerEntry>> {
        Ok(self
            .staged
            .entries
            .values()
            .filter(|e| e.kind().is_payable() && e.due_date().year() == year)
            .cloned()
            .collect())
    }

    async fn insert_entry(&mut self, draft: &EntryDraft) -> RepositoryResult<LedgerEntry> {
        self.check_writable()?;
        let id = EntryId::new(self.staged.next_entry_id);
        self.staged.next_entry_id += 1;
        let entry = LedgerEntry::from_draft(id, draft.clone());
        self.staged.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn update_entry(&mut self, entry: &LedgerEntry) -> RepositoryResult<bool> {
        self.check_writable()?;
        match self.staged.entries.get_mut(&entry.id()) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_entry(&mut self, id: EntryId) -> RepositoryResult<bool> {
        Ok(self.staged.entries.remove(&id).is_some())
    }
}

#[async_trait]
impl Session for InMemorySession {
    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        let Self {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        Ok(())
    }
}
