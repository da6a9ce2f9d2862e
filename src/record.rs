//! Record - one product entry, stored as an ordered JSON object.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

/// A partial field mapping, as accepted by [`RecordStore::update`](crate::RecordStore::update).
pub type Fields = Map<String, Value>;

/// Field holding the store-assigned identifier.
pub const ID_FIELD: &str = "id";

/// Field holding the unique product code.
pub const CODE_FIELD: &str = "code";

/// One product record.
///
/// The store only interprets `id` and `code`. Every other field (title,
/// price, stock, ...) is kept opaquely and in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Fields);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        let code: String = code.into();
        Self::new().with(CODE_FIELD, code)
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Build a record from any serializable value that encodes as a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, StoreError> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(StoreError::Serde(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Decode this record into a typed value.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    /// The store-assigned id, if the record has a non-negative integer `id`.
    pub fn id(&self) -> Option<u64> {
        self.0.get(ID_FIELD).and_then(Value::as_u64)
    }

    pub fn code(&self) -> Option<&Value> {
        self.0.get(CODE_FIELD)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }

    /// Overwrite (or append) the `id` field.
    pub(crate) fn assign_id(&mut self, id: u64) {
        self.0.insert(ID_FIELD.to_string(), Value::from(id));
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<Fields> for Record {
    fn from(fields: Fields) -> Self {
        Self(fields)
    }
}
