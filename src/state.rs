//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, the access gate (and through it the config store) and the
//! session table.

use crate::config::ConfigV1;
use crate::gate::AccessGate;
use crate::sessions::SessionStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Setup / sign-in gate backed by the configuration store.
    pub gate: Arc<AccessGate>,
    /// Signed-in browser sessions.
    pub sessions: Arc<SessionStore>,
}
