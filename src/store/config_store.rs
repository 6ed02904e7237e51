//! In-memory view of the configuration record backed by a durable [`Backend`].
//!
//! Reads go through [`ConfigStore::snapshot`], which only clones an `Arc` of
//! the last persisted record. Writers are serialized by a single mutex held
//! across read-modify-write-persist, and the snapshot is swapped only after
//! the backend has accepted the new record.
//!
//! The backing file is assumed to have a single writer: one running process.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde_json::Value;
use tracing::{debug, warn};

use super::Backend;
use crate::error::StoreError;
use crate::models::ConfigRecord;

pub struct ConfigStore {
    backend: Box<dyn Backend>,
    current: RwLock<Arc<ConfigRecord>>,
    writer: Mutex<()>,
}

impl ConfigStore {
    /// Loads the record from `backend`, creating an empty one if none exists.
    ///
    /// Unreadable or corrupt data is returned as an error and left in place.
    pub fn open(backend: Box<dyn Backend>) -> Result<Self, StoreError> {
        let record = match backend.read()? {
            Some(record) => {
                debug!(
                    location = %backend.location(),
                    keys = ?record.keys().collect::<Vec<_>>(),
                    "Loaded configuration record"
                );
                record
            }
            None => {
                warn!(
                    location = %backend.location(),
                    "Palbox configuration file not found, creating one now"
                );
                let record = ConfigRecord::empty();
                backend.write(&record)?;
                record
            }
        };

        Ok(ConfigStore {
            backend,
            current: RwLock::new(Arc::new(record)),
            writer: Mutex::new(()),
        })
    }

    /// The last persisted record. Never touches storage.
    pub fn snapshot(&self) -> Arc<ConfigRecord> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sets `key` to `value` and persists the whole record.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<(), StoreError> {
        let value = value.into();
        self.update(|record| {
            record.insert(key, value);
            Ok::<_, StoreError>(())
        })
    }

    /// Runs `f` against a copy of the current record while holding the writer
    /// lock, then persists the result.
    ///
    /// If `f` fails, or leaves the record in a shape that could not be loaded
    /// again, nothing is written. If persisting fails the in-memory record
    /// keeps its previous value.
    pub fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut ConfigRecord) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut draft = ConfigRecord::clone(&self.snapshot());
        let out = f(&mut draft)?;
        draft.validate().map_err(|reason| StoreError::Malformed {
            path: PathBuf::from(self.backend.location()),
            reason,
        })?;
        self.backend.write(&draft)?;

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(draft);
        Ok(out)
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}
