//! HTTP route definitions and handlers.
//!
//! Routes are grouped by how they are gated: the one-shot setup form, the
//! sign-in/sign-out pair, the protected console pages, and the ungated health
//! check. Every gated handler starts with an explicit `guard` call.

mod console_routes;
mod health_routes;
mod setup_routes;
mod signin_routes;

use crate::state::AppState;
use axum::Router;
use serde::Deserialize;

/// Body of the setup and sign-in forms.
#[derive(Deserialize)]
pub(crate) struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(setup_routes::routes())
        .merge(signin_routes::routes())
        .merge(console_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}
