//! Record storage.
//!
//! A store holds one collection of records keyed by `id` and pushes the full
//! snapshot to subscribers after every change. Two implementations ship:
//! [`MemoryStore`] keeps records in process, [`JsonFileStore`] persists them
//! as a JSON array on disk.

mod json_file;
mod memory;
mod seed;
mod subscription;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use seed::{sample_events, seed_sample_events};
pub use subscription::Subscription;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{BoardError, BoardResult};
use crate::event::Event;
use crate::media::Media;

/// Something a store can hold.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, also used as the file stem by [`JsonFileStore`].
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn set_timestamps(&mut self, created_at: Option<DateTime<Utc>>, updated_at: DateTime<Utc>);
}

impl Record for Event {
    const COLLECTION: &'static str = "events";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_timestamps(&mut self, created_at: Option<DateTime<Utc>>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = Some(updated_at);
    }
}

impl Record for Media {
    const COLLECTION: &'static str = "media";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_timestamps(&mut self, created_at: Option<DateTime<Utc>>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = Some(updated_at);
    }
}

/// A collection of records with change notification.
pub trait RecordStore<R: Record> {
    /// The current full snapshot, in insertion order.
    fn list(&self) -> BoardResult<Vec<R>>;

    fn get(&self, id: &str) -> BoardResult<R> {
        self.list()?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| BoardError::RecordNotFound(id.to_string()))
    }

    /// Insert a new record. Fails if the id is already taken.
    fn create(&self, record: R) -> BoardResult<R>;

    /// Replace the record with the same id, keeping its creation time.
    fn update(&self, record: R) -> BoardResult<R>;

    /// Remove a record permanently, returning what was removed.
    fn delete(&self, id: &str) -> BoardResult<R>;

    /// Register a listener. It is called right away with the current
    /// snapshot and again after every change, until the returned
    /// [`Subscription`] is dropped.
    fn subscribe<F>(&self, listener: F) -> BoardResult<Subscription>
    where
        F: Fn(&[R]) + Send + Sync + 'static;
}

// Collection edits shared by the store implementations.

fn insert_record<R: Record>(records: &mut Vec<R>, mut record: R) -> BoardResult<R> {
    if records.iter().any(|r| r.id() == record.id()) {
        return Err(BoardError::DuplicateId(record.id().to_string()));
    }
    let now = Utc::now();
    record.set_timestamps(Some(now), now);
    records.push(record.clone());
    Ok(record)
}

fn replace_record<R: Record>(records: &mut [R], mut record: R) -> BoardResult<R> {
    let existing = records
        .iter_mut()
        .find(|r| r.id() == record.id())
        .ok_or_else(|| BoardError::RecordNotFound(record.id().to_string()))?;

    record.set_timestamps(existing.created_at(), Utc::now());
    *existing = record.clone();
    Ok(record)
}

fn remove_record<R: Record>(records: &mut Vec<R>, id: &str) -> BoardResult<R> {
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| BoardError::RecordNotFound(id.to_string()))?;
    Ok(records.remove(index))
}
