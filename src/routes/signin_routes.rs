//! Sign-in and sign-out.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::CookieJar;
use tracing::debug;

use super::PasswordForm;
use crate::error::GateError;
use crate::gate::{RouteKind, Target};
use crate::state::AppState;
use crate::templates::{render, SigninTemplate, INVALID_CREDENTIALS};
use crate::utils::http_helpers::{
    expired_session_cookie, guard, session_cookie, ClientSession, HTTPError,
};

/// Registers sign-in routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signin", get(signin_page).post(signin_submit))
        .route("/signout", post(signout))
}

async fn signin_page(
    State(state): State<AppState>,
    client: ClientSession,
) -> Result<Html<String>, Redirect> {
    guard(&state, RouteKind::SignIn, &client)?;
    Ok(render(&SigninTemplate::new(None)))
}

/// Verifies the password and issues a new session cookie on success.
async fn signin_submit(
    State(state): State<AppState>,
    client: ClientSession,
    jar: CookieJar,
    Form(form): Form<PasswordForm>,
) -> Result<Response, HTTPError> {
    if let Err(redirect) = guard(&state, RouteKind::SignIn, &client) {
        return Ok(redirect.into_response());
    }

    let mut session = client.session;
    match state.gate.sign_in(&mut session, &form.password) {
        Ok(()) => {
            // Never carry a pre-sign-in token over into the signed-in session.
            if let Some(old) = client.token.as_deref() {
                state.sessions.remove(old);
            }
            let token = state.sessions.insert(session);
            let jar = jar.add(session_cookie(&state.config.session.cookie_name, token));
            Ok((jar, Redirect::to(Target::Home.path())).into_response())
        }
        Err(GateError::Authentication(_)) => {
            Ok(render(&SigninTemplate::new(Some(INVALID_CREDENTIALS))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Drops the caller's session and returns to the sign-in form.
async fn signout(
    State(state): State<AppState>,
    client: ClientSession,
    jar: CookieJar,
) -> Response {
    if let Err(redirect) = guard(&state, RouteKind::Open, &client) {
        return redirect.into_response();
    }

    let mut session = client.session;
    state.gate.sign_out(&mut session);
    if let Some(token) = client.token.as_deref() {
        state.sessions.remove(token);
        debug!("Session signed out");
    }

    let jar = jar.remove(expired_session_cookie(&state.config.session.cookie_name));
    (jar, Redirect::to(Target::SignIn.path())).into_response()
}
