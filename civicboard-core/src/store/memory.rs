//! In-process record store.

use std::sync::Mutex;

use tracing::debug;

use super::subscription::{Subscribers, Subscription};
use super::{Record, RecordStore, insert_record, remove_record, replace_record};
use crate::error::BoardResult;

/// Keeps a collection in memory. Nothing survives the process.
pub struct MemoryStore<R: Record> {
    records: Mutex<Vec<R>>,
    subscribers: Subscribers<R>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<R>) -> Self {
        MemoryStore {
            records: Mutex::new(records),
            subscribers: Subscribers::new(),
        }
    }

    /// Apply `edit` to the collection and, if it succeeds, notify
    /// subscribers with the new snapshot.
    fn mutate<T>(&self, edit: impl FnOnce(&mut Vec<R>) -> BoardResult<T>) -> BoardResult<T> {
        let (result, snapshot) = {
            let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
            let result = edit(&mut records)?;
            (result, records.clone())
        };
        self.subscribers.notify(&snapshot);
        Ok(result)
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> for MemoryStore<R> {
    fn list(&self) -> BoardResult<Vec<R>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn create(&self, record: R) -> BoardResult<R> {
        let created = self.mutate(|records| insert_record(records, record))?;
        debug!(collection = R::COLLECTION, id = created.id(), "created record");
        Ok(created)
    }

    fn update(&self, record: R) -> BoardResult<R> {
        let updated = self.mutate(|records| replace_record(records, record))?;
        debug!(collection = R::COLLECTION, id = updated.id(), "updated record");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> BoardResult<R> {
        let removed = self.mutate(|records| remove_record(records, id))?;
        debug!(collection = R::COLLECTION, id, "deleted record");
        Ok(removed)
    }

    fn subscribe<F>(&self, listener: F) -> BoardResult<Subscription>
    where
        F: Fn(&[R]) + Send + Sync + 'static,
    {
        listener(&self.list()?);
        Ok(self.subscribers.add(listener))
    }
}
