//! In-memory stores backed by key-value persistence.
//!
//! Every mutation builds the next version of a collection, writes the whole
//! collection to storage, and only then replaces the in-memory copy. A failed
//! write leaves the store exactly as it was.

mod clinic;
mod data;
pub mod keys;
mod settings;

pub use clinic::*;
pub use data::*;
pub use settings::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::capability::Capability;
use crate::db::{DbError, KeyValueStore};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),

    #[error("Corrupt value under key '{key}': {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not supported: {0}")]
    Unsupported(Capability),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read a JSON array stored under `key`. A missing key is an empty collection.
pub(crate) fn load_collection<T: DeserializeOwned>(
    storage: &impl KeyValueStore,
    key: &'static str,
) -> StoreResult<Vec<T>> {
    match storage.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| {
            tracing::error!(key, error = %source, "stored collection could not be decoded");
            StoreError::Decode { key, source }
        }),
        None => Ok(Vec::new()),
    }
}

/// Encode a collection as the JSON array stored under its key.
pub(crate) fn encode_collection<T: Serialize>(items: &[T]) -> StoreResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Write a batch of entries, logging the failure before handing it back.
pub(crate) fn write_entries(
    storage: &mut impl KeyValueStore,
    entries: &[(&str, &str)],
) -> StoreResult<()> {
    storage.put_batch(entries).map_err(|e| {
        let keys: Vec<&str> = entries.iter().map(|(key, _)| *key).collect();
        tracing::error!(?keys, error = %e, "failed to persist");
        StoreError::from(e)
    })
}

/// Persist a whole collection under `key`.
pub(crate) fn persist_collection<T: Serialize>(
    storage: &mut impl KeyValueStore,
    key: &'static str,
    items: &[T],
) -> StoreResult<()> {
    let json = encode_collection(items)?;
    write_entries(storage, &[(key, &json)])
}

/// Append `item` to `items`, committing only once the write succeeds.
pub(crate) fn append_persisted<T: Clone + Serialize>(
    storage: &mut impl KeyValueStore,
    key: &'static str,
    items: &mut Vec<T>,
    item: T,
) -> StoreResult<()> {
    let mut next = items.clone();
    next.push(item);
    persist_collection(storage, key, &next)?;
    *items = next;
    Ok(())
}

/// Update the first element matching `matches`, committing only once the
/// write succeeds. Returns the updated element, or `None` with no write when
/// nothing matches.
pub(crate) fn update_persisted<T, M, F>(
    storage: &mut impl KeyValueStore,
    key: &'static str,
    items: &mut Vec<T>,
    matches: M,
    apply: F,
) -> StoreResult<Option<T>>
where
    T: Clone + Serialize,
    M: Fn(&T) -> bool,
    F: FnOnce(&mut T),
{
    let Some(index) = items.iter().position(matches) else {
        return Ok(None);
    };

    let mut next = items.clone();
    apply(&mut next[index]);
    persist_collection(storage, key, &next)?;

    let updated = next[index].clone();
    *items = next;
    Ok(Some(updated))
}

/// Money amounts must be finite and non-negative.
pub(crate) fn ensure_amount(label: &str, value: f64) -> StoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StoreError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            label, value
        )))
    }
}
