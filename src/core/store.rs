//! Durable key-value storage for the two persisted records.
//!
//! Values are JSON text. Reads that fail or do not parse fall back to the
//! caller's default; writes that fail are logged and dropped, the
//! in-memory state stays authoritative.

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::warn;

/// Key of the target list record.
pub const ITEMS_KEY: &str = "tvh_items";
/// Key of the profile record.
pub const PROFILE_KEY: &str = "tvh_profile";

pub trait KvStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// Read and decode `key`, or return `fallback` when missing or corrupt.
pub fn load_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str, fallback: T) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored record");
            return fallback;
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "stored record is corrupt, using defaults");
        fallback
    })
}

/// Encode and write `value` under `key`. Failures are logged and
/// swallowed; returns whether the record reached the store.
pub fn save_json<T: Serialize + ?Sized>(store: &mut dyn KvStore, key: &str, value: &T) -> bool {
    let encoded = match serde_json::to_string(value) {
        Ok(s) => s,
        Err(e) => {
            warn!(key, error = %e, "failed to encode record");
            return false;
        }
    };

    match store.set(key, &encoded) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "failed to persist record");
            false
        }
    }
}

/// Process-local store. `failing()` builds one whose writes always fail.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Storage("memory store is read-only".into()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
