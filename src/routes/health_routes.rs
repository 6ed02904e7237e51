//! Health check endpoint. Never gated.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Reports liveness and whether first-run setup has happened. Reads only the
/// in-memory snapshot.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let setup_complete = state.gate.store().snapshot().is_setup_complete();
    Json(json!({ "status": "OK", "setup_complete": setup_complete }))
}
