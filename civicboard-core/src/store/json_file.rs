//! Record store persisted as a JSON array on disk.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use super::subscription::{Subscribers, Subscription};
use super::{Record, RecordStore, insert_record, remove_record, replace_record};
use crate::error::{BoardError, BoardResult};

/// Stores a collection in `<dir>/<collection>.json`.
///
/// Entries that fail to deserialize are skipped with a warning, but kept
/// verbatim in the file so that a later fix (or a newer version) can still
/// read them.
pub struct JsonFileStore<R: Record> {
    path: PathBuf,
    subscribers: Subscribers<R>,
}

/// A collection as read from disk, in file order. Entries that could not be
/// loaded as records are kept as raw JSON.
struct Loaded<R> {
    entries: Vec<Result<R, Value>>,
}

impl<R: Record> Loaded<R> {
    fn records(&self) -> Vec<R> {
        self.entries
            .iter()
            .filter_map(|entry| entry.as_ref().ok())
            .cloned()
            .collect()
    }

    /// Swap in an edited record list. Surviving records keep their place in
    /// the file, new ones go at the end. Raw entries carrying the id of a
    /// deleted record are dropped along with it.
    fn replace_records(&mut self, records: Vec<R>) {
        let mut pending: Vec<Option<R>> = records.into_iter().map(Some).collect();
        let mut removed: Vec<String> = Vec::new();
        let mut merged = Vec::with_capacity(self.entries.len() + 1);

        for entry in self.entries.drain(..) {
            match entry {
                Ok(old) => {
                    let edited = pending
                        .iter_mut()
                        .find(|slot| slot.as_ref().is_some_and(|r| r.id() == old.id()))
                        .and_then(Option::take);
                    match edited {
                        Some(record) => merged.push(Ok(record)),
                        None => removed.push(old.id().to_string()),
                    }
                }
                Err(value) => merged.push(Err(value)),
            }
        }

        merged.retain(|entry| match entry {
            Ok(_) => true,
            Err(value) => !value
                .get("id")
                .and_then(Value::as_str)
                .is_some_and(|id| removed.iter().any(|r| r == id)),
        });
        merged.extend(pending.into_iter().flatten().map(Ok));

        self.entries = merged;
    }
}

impl<R: Record> JsonFileStore<R> {
    pub fn open(dir: &Path) -> Self {
        JsonFileStore {
            path: dir.join(format!("{}.json", R::COLLECTION)),
            subscribers: Subscribers::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BoardResult<Loaded<R>> {
        let mut loaded = Loaded {
            entries: Vec::new(),
        };

        if !self.path.exists() {
            return Ok(loaded);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(loaded);
        }

        let values: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            BoardError::Serialization(format!("{}: {}", self.path.display(), e))
        })?;

        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<R>(value.clone()) {
                Ok(record)
                    if loaded
                        .entries
                        .iter()
                        .any(|e| matches!(e, Ok(r) if r.id() == record.id())) =>
                {
                    warn!(
                        collection = R::COLLECTION,
                        index,
                        id = record.id(),
                        "skipping record with duplicate id"
                    );
                    loaded.entries.push(Err(value));
                }
                Ok(record) => loaded.entries.push(Ok(record)),
                Err(error) => {
                    warn!(
                        collection = R::COLLECTION,
                        index,
                        %error,
                        "skipping malformed record"
                    );
                    loaded.entries.push(Err(value));
                }
            }
        }

        Ok(loaded)
    }

    fn save(&self, loaded: &Loaded<R>) -> BoardResult<()> {
        let mut values = Vec::with_capacity(loaded.entries.len());
        for entry in &loaded.entries {
            values.push(match entry {
                Ok(record) => serde_json::to_value(record)
                    .map_err(|e| BoardError::Serialization(e.to_string()))?,
                Err(value) => value.clone(),
            });
        }

        let content = serde_json::to_string_pretty(&values)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn mutate<T>(&self, edit: impl FnOnce(&mut Vec<R>) -> BoardResult<T>) -> BoardResult<T> {
        let mut loaded = self.load()?;
        let mut records = loaded.records();
        let result = edit(&mut records)?;
        loaded.replace_records(records);
        self.save(&loaded)?;
        self.subscribers.notify(&loaded.records());
        Ok(result)
    }
}

impl<R: Record> RecordStore<R> for JsonFileStore<R> {
    fn list(&self) -> BoardResult<Vec<R>> {
        Ok(self.load()?.records())
    }

    fn create(&self, record: R) -> BoardResult<R> {
        let created = self.mutate(|records| insert_record(records, record))?;
        debug!(collection = R::COLLECTION, id = created.id(), path = %self.path.display(), "created record");
        Ok(created)
    }

    fn update(&self, record: R) -> BoardResult<R> {
        let updated = self.mutate(|records| replace_record(records, record))?;
        debug!(collection = R::COLLECTION, id = updated.id(), path = %self.path.display(), "updated record");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> BoardResult<R> {
        let removed = self.mutate(|records| remove_record(records, id))?;
        debug!(collection = R::COLLECTION, id, path = %self.path.display(), "deleted record");
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
