//! sessionStorage cache for the static JSON assets (item catalog, channels).
//!
//! Entries are stored as `{"v": <version>, "data": ...}`. Bumping
//! [`FORMAT_VERSION`] after changing an asset's shape makes old entries
//! misses instead of decode errors. Unreadable entries are dropped on read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dom;

/// Version tag written into every entry.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("sessionStorage not available")]
    StorageUnavailable,
    #[error("cache entry could not be encoded: {0}")]
    Encode(String),
    #[error("sessionStorage rejected the entry (quota?)")]
    WriteFailed,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    v: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    v: u32,
    data: T,
}

fn encode<T: Serialize>(data: &T) -> Result<String, CacheError> {
    let entry = EnvelopeRef {
        v: FORMAT_VERSION,
        data,
    };
    serde_json::to_string(&entry).map_err(|e| CacheError::Encode(e.to_string()))
}

/// `None` for entries of another version or shape.
fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let entry: Envelope<T> = serde_json::from_str(raw).ok()?;
    (entry.v == FORMAT_VERSION).then_some(entry.data)
}

pub fn get<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = dom::session_storage()?;
    let raw = storage.get_item(key).ok()??;
    let data = decode(&raw);
    if data.is_none() {
        let _ = storage.remove_item(key);
    }
    data
}

pub fn set<T: Serialize>(key: &str, data: &T) -> Result<(), CacheError> {
    let storage = dom::session_storage().ok_or(CacheError::StorageUnavailable)?;
    let raw = encode(data)?;
    storage
        .set_item(key, &raw)
        .map_err(|_| CacheError::WriteFailed)
}
