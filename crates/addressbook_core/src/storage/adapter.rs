//! JSON adapter over a raw key/value backend.
//!
//! # Responsibility
//! - Serialize values to JSON text on write and decode them on read.
//! - Absorb every backend or codec failure into a default value or `false`.
//!
//! # Invariants
//! - No method returns `Err` or panics on storage failure.
//! - Failures are logged with the key only, never the value.

use super::kv::{KeyValueBackend, StorageError};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Failure-absorbing JSON view of a [`KeyValueBackend`].
pub struct StorageAdapter<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> StorageAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the decoded value stored at `key`, or `default`.
    ///
    /// `default` is returned when the key is missing, holds empty text,
    /// cannot be read, or does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(err) => {
                warn!("event=storage_get module=storage status=error key={key} error={err}");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(source) => {
                let err = StorageError::Deserialize {
                    key: key.to_string(),
                    source,
                };
                warn!("event=storage_get module=storage status=error key={key} error={err}");
                default
            }
        }
    }

    /// Stores `value` as JSON under `key`, returning whether it was persisted.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(source) => {
                let err = StorageError::Serialize {
                    key: key.to_string(),
                    source,
                };
                warn!("event=storage_set module=storage status=error key={key} error={err}");
                return false;
            }
        };

        match self.backend.write(key, &encoded) {
            Ok(()) => {
                debug!(
                    "event=storage_set module=storage status=ok key={key} bytes={}",
                    encoded.len()
                );
                true
            }
            Err(err) => {
                warn!("event=storage_set module=storage status=error key={key} error={err}");
                false
            }
        }
    }

    /// Deletes `key`. Removing a missing key counts as success.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.delete(key) {
            Ok(()) => true,
            Err(err) => {
                warn!("event=storage_remove module=storage status=error key={key} error={err}");
                false
            }
        }
    }

    /// Deletes every key held by the backend.
    pub fn clear(&self) -> bool {
        match self.backend.clear() {
            Ok(()) => true,
            Err(err) => {
                warn!("event=storage_clear module=storage status=error error={err}");
                false
            }
        }
    }
}
