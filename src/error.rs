//! Error types for the configuration store and the access gate.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the backing configuration file.
///
/// Every variant is fatal from the operator's point of view: nothing here is
/// retried or auto-healed, and a corrupt file is never rewritten.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create configuration directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration file {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration file {} is malformed: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("could not write configuration file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcomes of a failed setup or sign-in transition.
#[derive(Debug, Error)]
pub enum GateError {
    /// Input to a transition was unusable. The form is shown again.
    #[error("validation error: {0}")]
    Validation(&'static str),

    /// The supplied password did not match. Deliberately generic.
    #[error("authentication error: {0}")]
    Authentication(&'static str),

    /// Setup was attempted after a credential had already been stored.
    #[error("setup has already been completed")]
    AlreadyConfigured,

    #[error(transparent)]
    Storage(#[from] StoreError),
}
