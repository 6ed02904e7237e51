use std::sync::Arc;

use tracing::{error, info};

use super::{ConfigStore, JsonFileBackend};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::ConfigRecord;

/// The Backend trait abstracts durable storage of the configuration record.
///
/// Implementations must make `write` atomic: after it returns, either the new
/// record is fully stored or the previous one is untouched.
pub trait Backend: Send + Sync {
    /// Reads the stored record. `Ok(None)` means nothing has been stored yet.
    fn read(&self) -> Result<Option<ConfigRecord>, StoreError>;

    /// Replaces the stored record with `record`.
    fn write(&self, record: &ConfigRecord) -> Result<(), StoreError>;

    /// Human readable location, for logs.
    fn location(&self) -> String;
}

/// Opens the configuration store described by `config`.
///
/// A missing file is created empty; any other failure is returned so startup
/// can abort without touching the file.
pub fn create_store(config: &StoreConfig) -> Result<Arc<ConfigStore>, StoreError> {
    let backend = JsonFileBackend::new(&config.path);
    match ConfigStore::open(Box::new(backend)) {
        Ok(store) => {
            info!(
                path = %config.path.display(),
                setup_complete = store.snapshot().is_setup_complete(),
                "Configuration store opened."
            );
            Ok(Arc::new(store))
        }
        Err(e) => {
            error!("Failed to open configuration store: {}", e);
            Err(e)
        }
    }
}
