//! Storage - the single backing resource a [`RecordStore`](crate::RecordStore) reads and rewrites.
//!
//! A storage only moves whole snapshots: it never interprets the bytes.
//!
//! ## Example
//!
//! ```ignore
//! use product_store::{InMemoryStorage, JsonFileStorage, RecordStore};
//!
//! let on_disk = RecordStore::new(JsonFileStorage::new("productos.json"));
//! let scratch = RecordStore::new(InMemoryStorage::new());
//! ```

mod file;
mod in_memory;

use std::future::Future;

use crate::error::StoreError;

/// Whole-snapshot access to one backing resource.
pub trait Storage: Send + Sync {
    /// Read the full content. `Ok(None)` means the resource does not exist.
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Replace the full content. After the future settles the resource holds
    /// either the previous content or `bytes`, never a mix.
    fn write(&self, bytes: Vec<u8>) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Human-readable location, used in log output.
    fn describe(&self) -> String;
}

pub use file::JsonFileStorage;
pub use in_memory::InMemoryStorage;
