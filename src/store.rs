//! RecordStore - CRUD over a whole-file JSON collection.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::collection;
use crate::error::StoreError;
use crate::record::{Fields, Record};
use crate::storage::{JsonFileStorage, Storage};

/// Options controlling how the collection is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Write two-space indented JSON instead of a single line.
    pub pretty: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl StoreOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// A product collection persisted as one JSON array.
///
/// Every operation loads the full collection from storage, and every mutation
/// rewrites it in full. No state is cached between calls; the next id is
/// always derived from the highest id currently stored.
///
/// There is no concurrency control. Two writers sharing a backing resource
/// (two processes, two instances, or overlapping calls on one instance) can
/// both read the same snapshot and compute the same next id, and the later
/// write silently discards the earlier one. Use one instance per resource and
/// do not overlap mutating calls.
pub struct RecordStore<S> {
    storage: S,
    options: StoreOptions,
}

impl RecordStore<JsonFileStorage> {
    /// Open a store backed by the JSON file at `path`. The file need not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileStorage::new(path))
    }
}

impl<S: Storage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: S, options: StoreOptions) -> Self {
        Self { storage, options }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// All records, in insertion order.
    ///
    /// A missing, blank, or `null` resource yields an empty list. Truncated or
    /// otherwise unparseable content is [`StoreError::Malformed`].
    pub async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let records = match self.storage.read().await? {
            Some(bytes) => collection::decode(&bytes).inspect_err(|err| {
                warn!(storage = %self.storage.describe(), error = %err, "unreadable collection");
            })?,
            None => Vec::new(),
        };
        debug!(storage = %self.storage.describe(), count = records.len(), "loaded collection");
        Ok(records)
    }

    /// The record with `id`, or `None` if there is none.
    pub async fn get(&self, id: u64) -> Result<Option<Record>, StoreError> {
        let records = self.list().await?;
        Ok(collection::find(&records, id).cloned())
    }

    /// Insert `record` under the next free id and return it as stored.
    ///
    /// Any `id` on the incoming record is replaced. Fails with
    /// [`StoreError::DuplicateCode`] without writing if the code is taken, and
    /// with [`StoreError::Malformed`] if the stored ids leave no room for another.
    pub async fn add(&self, record: Record) -> Result<Record, StoreError> {
        let mut records = self.list().await?;
        let stored = collection::insert(&mut records, record).inspect_err(|err| {
            warn!(error = %err, "insert rejected");
        })?;

        self.persist(&records).await?;
        info!(id = stored.id(), "record added");
        Ok(stored)
    }

    /// Shallow-merge `fields` into the record with `id`.
    ///
    /// Fields not named in `fields` are kept and the `id` cannot be changed.
    /// Returns `None`, without writing, if no record has `id`.
    ///
    /// `code` uniqueness is only enforced by [`add`](Self::add); an update can
    /// give a record a code another record already has.
    pub async fn update(&self, id: u64, fields: Fields) -> Result<Option<Record>, StoreError> {
        let mut records = self.list().await?;
        let Some(updated) = collection::merge(&mut records, id, fields) else {
            debug!(id, "update target not found");
            return Ok(None);
        };

        self.persist(&records).await?;
        info!(id, "record updated");
        Ok(Some(updated))
    }

    /// Remove the record with `id`.
    ///
    /// Removing an absent id is not an error; the collection is rewritten
    /// either way and the call reports `true`.
    pub async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut records = self.list().await?;
        let removed = collection::remove(&mut records, id);

        self.persist(&records).await?;
        info!(id, removed, "record deleted");
        Ok(true)
    }

    /// Replace the stored collection with `records`.
    pub async fn persist(&self, records: &[Record]) -> Result<(), StoreError> {
        let bytes = collection::encode(records, self.options.pretty)?;
        self.storage.write(bytes).await?;
        debug!(storage = %self.storage.describe(), count = records.len(), "persisted collection");
        Ok(())
    }
}
