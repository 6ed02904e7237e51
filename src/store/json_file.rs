use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Backend;
use crate::error::StoreError;
use crate::models::ConfigRecord;

/// Stores the configuration record as one JSON object in a single file.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous file intact.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl Backend for JsonFileBackend {
    fn read(&self) -> Result<Option<ConfigRecord>, StoreError> {
        debug!(path = %self.path.display(), "Reading configuration file");
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        ConfigRecord::from_value(value)
            .map(Some)
            .map_err(|reason| StoreError::Malformed {
                path: self.path.clone(),
                reason,
            })
    }

    fn write(&self, record: &ConfigRecord) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| write_err(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(&bytes).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(path = %self.path.display(), keys = record.len(), "Configuration file written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
