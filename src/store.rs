//! Persistent key/value store holding the serialized [`ResultRecord`].
//!
//! Writes are best effort: a full or missing store is logged and otherwise
//! ignored, since the rendered result does not depend on it.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::quiz::ResultRecord;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store. `reject_writes` simulates a full quota.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    pub reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::WriteRejected(key.to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`, resolved lazily on each call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::WriteRejected(key.to_string()))
    }
}

/// Overwrite the stored record. Failures are logged, never returned.
pub fn save_record<K: KeyValueStore + ?Sized>(store: &mut K, key: &str, record: &ResultRecord) {
    let outcome = serde_json::to_string(record)
        .map_err(StoreError::from)
        .and_then(|json| store.set(key, &json));
    match outcome {
        Ok(()) => log::debug!("saved quiz result '{}' under '{key}'", record.path),
        Err(e) => log::warn!("could not persist quiz result: {e}"),
    }
}

/// Read the stored record; `None` if absent, unreadable or malformed.
pub fn load_record<K: KeyValueStore + ?Sized>(store: &K, key: &str) -> Option<ResultRecord> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("could not read quiz result: {e}");
            return None;
        }
    };
    match serde_json::from_str::<ResultRecord>(&raw) {
        Ok(record) if !record.house.is_empty() && !record.label.is_empty() => Some(record),
        Ok(_) => {
            log::debug!("stored quiz result under '{key}' is incomplete");
            None
        }
        Err(e) => {
            log::debug!("stored quiz result under '{key}' is malformed: {e}");
            None
        }
    }
}

pub fn load_record_or_placeholder<K: KeyValueStore + ?Sized>(store: &K, key: &str) -> ResultRecord {
    load_record(store, key).unwrap_or_else(ResultRecord::placeholder)
}
