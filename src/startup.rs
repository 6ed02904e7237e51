//! Application startup and server initialization.
//!
//! Opens the configuration store, wires the access gate and session table
//! into the router, and serves it on the configured address.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::error::StoreError;
use crate::gate::AccessGate;
use crate::routes;
use crate::sessions::SessionStore;
use crate::state::AppState;
use crate::store::create_store;

/// Builds the shared state for `config`, opening (or creating) the
/// configuration store.
///
/// # Errors
///
/// Returns a [`StoreError`] if the configuration file cannot be created or is
/// corrupt. The file is left untouched in that case.
pub fn build_state(config: Arc<ConfigV1>) -> Result<AppState, StoreError> {
    let store = create_store(&config.store)?;
    let sessions = Arc::new(SessionStore::new(config.session.max_sessions));
    Ok(AppState {
        config,
        gate: Arc::new(AccessGate::new(store)),
        sessions,
    })
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the configuration store cannot be opened, the server
/// fails to bind to the configured address, or serving fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone())?;
    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
