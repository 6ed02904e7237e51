//! The one-shot setup form.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};

use super::PasswordForm;
use crate::error::GateError;
use crate::gate::{RouteKind, Target};
use crate::state::AppState;
use crate::templates::{render, SetupTemplate, MISSING_PASSWORD};
use crate::utils::http_helpers::{guard, ClientSession, HTTPError};

/// Registers setup routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/setup", get(setup_page).post(setup_submit))
}

async fn setup_page(
    State(state): State<AppState>,
    client: ClientSession,
) -> Result<Html<String>, Redirect> {
    guard(&state, RouteKind::Setup, &client)?;
    Ok(render(&SetupTemplate::new(None)))
}

/// Stores the admin credential and sends the browser on to sign in.
///
/// An empty password re-renders the form. A setup that loses the race to
/// another submission is treated like a visit after setup: off to sign-in.
async fn setup_submit(
    State(state): State<AppState>,
    client: ClientSession,
    Form(form): Form<PasswordForm>,
) -> Result<Response, HTTPError> {
    if let Err(redirect) = guard(&state, RouteKind::Setup, &client) {
        return Ok(redirect.into_response());
    }

    match state.gate.complete_setup(&form.password) {
        Ok(()) | Err(GateError::AlreadyConfigured) => {
            Ok(Redirect::to(Target::SignIn.path()).into_response())
        }
        Err(GateError::Validation(_)) => {
            Ok(render(&SetupTemplate::new(Some(MISSING_PASSWORD))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
