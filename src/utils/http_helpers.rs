use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use http::request::Parts;
use tracing::error;

use crate::error::{GateError, StoreError};
use crate::gate::{Outcome, RouteKind};
use crate::models::Session;
use crate::state::AppState;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message }).to_string();
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

/// Storage faults are logged in full and reported to the client generically.
impl From<StoreError> for HTTPError {
    fn from(e: StoreError) -> Self {
        error!("Configuration storage failure: {}", e);
        HTTPError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Configuration storage failure",
        )
    }
}

/// The form handlers resolve validation and authentication failures into
/// re-rendered pages before this point, so in practice only storage faults
/// arrive here. Anything else is still the client's doing and reported as 400.
impl From<GateError> for HTTPError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::Storage(e) => e.into(),
            other => HTTPError::new(StatusCode::BAD_REQUEST, other.to_string()),
        }
    }
}

/// The caller's session as found through its cookie.
///
/// A missing or unknown cookie yields a fresh, signed-out session with no
/// token.
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub token: Option<String>,
    pub session: Session,
}

#[async_trait]
impl FromRequestParts<AppState> for ClientSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let found = jar
            .get(&state.config.session.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .and_then(|token| state.sessions.get(&token).map(|session| (token, session)));

        Ok(match found {
            Some((token, session)) => ClientSession {
                token: Some(token),
                session,
            },
            None => ClientSession {
                token: None,
                session: Session::new(),
            },
        })
    }
}

/// Cookie that hands `token` to the browser.
pub fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Cookie to pass to [`CookieJar::remove`] so the browser drops the session.
pub fn expired_session_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), "")).path("/").build()
}

/// Runs the gate for a route of `kind`. `Err` carries the redirect to return
/// instead of the page.
pub fn guard(state: &AppState, kind: RouteKind, client: &ClientSession) -> Result<(), Redirect> {
    match state.gate.authorize(kind, &client.session) {
        Outcome::Proceed => Ok(()),
        Outcome::Redirect(target) => Err(Redirect::to(target.path())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::path::PathBuf;

    #[test]
    fn session_cookie_is_http_only_and_site_wide() {
        let cookie = session_cookie("palbox_session", "tok".to_string());
        assert_eq!(cookie.name(), "palbox_session");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }

    #[test]
    fn removing_a_presented_cookie_expires_it() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; palbox_session=abc"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(jar.get("palbox_session").map(|c| c.value()), Some("abc"));

        let jar = jar.remove(expired_session_cookie("palbox_session"));
        let response = jar.into_response();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(set_cookie.starts_with("palbox_session=;"), "{}", set_cookie);
        assert!(set_cookie.contains("Max-Age=0"), "{}", set_cookie);
    }

    #[test]
    fn storage_faults_become_server_errors() {
        let err = GateError::Storage(StoreError::Malformed {
            path: PathBuf::from("config/palbox_config.json"),
            reason: "bad".to_string(),
        });
        let response = HTTPError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unresolved_gate_errors_are_bad_requests() {
        let response = HTTPError::from(GateError::AlreadyConfigured).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
