//! Protected console pages.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Router;

use crate::gate::RouteKind;
use crate::state::AppState;
use crate::templates::{
    render, DashboardTemplate, PalworldSettingsTemplate, SettingsTemplate, StatsTemplate,
};
use crate::utils::http_helpers::{guard, ClientSession};

/// Registers the console pages.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/stats", get(stats))
        .route("/settings", get(settings))
        .route("/palworld_settings", get(palworld_settings))
}

async fn home(
    State(state): State<AppState>,
    client: ClientSession,
) -> Result<Html<String>, Redirect> {
    guard(&state, RouteKind::Protected, &client)?;
    Ok(render(&DashboardTemplate {
        location: "dashboard",
    }))
}

async fn stats(
    State(state): State<AppState>,
    client: ClientSession,
) -> Result<Html<String>, Redirect> {
    guard(&state, RouteKind::Protected, &client)?;
    Ok(render(&StatsTemplate { location: "stats" }))
}

async fn settings(
    State(state): State<AppState>,
    client: ClientSession,
) -> Result<Html<String>, Redirect> {
    guard(&state, RouteKind::Protected, &client)?;
    Ok(render(&SettingsTemplate {
        location: "settings",
        store_location: state.gate.store().location(),
        signed_in_since: client.session.created_at,
    }))
}

async fn palworld_settings(
    State(state): State<AppState>,
    client: ClientSession,
) -> Result<Html<String>, Redirect> {
    guard(&state, RouteKind::Protected, &client)?;
    Ok(render(&PalworldSettingsTemplate {
        location: "palworld_settings",
    }))
}
