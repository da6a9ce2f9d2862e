//! Flat-file JSON product store.
//!
//! A [`RecordStore`] keeps a collection of product [`Record`]s as one JSON
//! array. Each call loads the whole array, transforms it in memory, and (for
//! mutations) writes the whole array back.
//!
//! ```ignore
//! use product_store::{Record, RecordStore};
//!
//! let store = RecordStore::open("productos.json");
//! let stored = store.add(Record::with_code("P001").with("price", 19.99)).await?;
//! assert_eq!(stored.id(), Some(1));
//! ```

pub mod collection;
mod error;
mod record;
mod storage;
mod store;

#[cfg(feature = "http")]
pub mod http;

pub use error::StoreError;
pub use record::{Fields, Record, CODE_FIELD, ID_FIELD};
pub use storage::{InMemoryStorage, JsonFileStorage, Storage};
pub use store::{RecordStore, StoreOptions};
