//! Pure transformations over a loaded collection.
//!
//! Every store operation loads the full collection, applies one of these
//! functions, and (for mutations) persists the result. Nothing here touches
//! storage.

use serde_json::Value;

use crate::error::StoreError;
use crate::record::{Fields, Record, ID_FIELD};

/// The id the next inserted record will receive: the highest stored id plus one.
///
/// Records without a numeric id count as zero. Returns `None` once the
/// highest stored id is `u64::MAX`.
pub fn next_id(records: &[Record]) -> Option<u64> {
    records
        .iter()
        .filter_map(Record::id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
}

pub fn find(records: &[Record], id: u64) -> Option<&Record> {
    records.iter().find(|record| record.id() == Some(id))
}

/// Append `record` with a freshly assigned id.
///
/// Fails with [`StoreError::DuplicateCode`] and leaves `records` untouched if
/// another record already has the same `code` value. An id supplied by the
/// caller is overwritten. Fails with [`StoreError::Malformed`] if the stored
/// ids leave no room for another one.
pub fn insert(records: &mut Vec<Record>, mut record: Record) -> Result<Record, StoreError> {
    let id = next_id(records)
        .ok_or_else(|| StoreError::Malformed("id space exhausted".to_string()))?;

    if records.iter().any(|existing| existing.code() == record.code()) {
        return Err(StoreError::DuplicateCode(describe_code(record.code())));
    }

    record.assign_id(id);
    records.push(record.clone());
    Ok(record)
}

/// Shallow-merge `fields` into the record with `id`, returning the merged record.
///
/// The `id` key of `fields` is ignored. `code` uniqueness is not re-checked.
pub fn merge(records: &mut [Record], id: u64, fields: Fields) -> Option<Record> {
    let record = records.iter_mut().find(|record| record.id() == Some(id))?;
    for (key, value) in fields {
        if key != ID_FIELD {
            record.insert(key, value);
        }
    }
    Some(record.clone())
}

/// Remove the record with `id`, returning how many records were dropped.
pub fn remove(records: &mut Vec<Record>, id: u64) -> usize {
    let before = records.len();
    records.retain(|record| record.id() != Some(id));
    before - records.len()
}

/// Parse stored bytes into a collection.
///
/// Blank and `null` content decode to an empty collection. Anything else that
/// is not a complete array of objects, truncated content included, is
/// [`StoreError::Malformed`].
pub fn decode(bytes: &[u8]) -> Result<Vec<Record>, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let records = serde_json::from_slice::<Option<Vec<Record>>>(bytes)
        .map_err(|err| StoreError::Malformed(err.to_string()))?;
    Ok(records.unwrap_or_default())
}

pub fn encode(records: &[Record], pretty: bool) -> Result<Vec<u8>, StoreError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(records)?
    } else {
        serde_json::to_vec(records)?
    };
    Ok(bytes)
}

fn describe_code(code: Option<&Value>) -> String {
    match code {
        Some(value) => value.to_string(),
        None => "<missing>".to_string(),
    }
}
