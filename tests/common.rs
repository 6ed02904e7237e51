#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use palbox::config::{ConfigV1, StoreConfig};
use palbox::routes::create_router;
use palbox::startup::build_state;
use palbox::state::AppState;

pub const COOKIE_NAME: &str = "palbox_session";

pub fn config_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("config").join("palbox_config.json")
}

pub fn test_config(dir: &tempfile::TempDir) -> ConfigV1 {
    ConfigV1 {
        store: StoreConfig {
            path: config_path(dir),
        },
        ..ConfigV1::default()
    }
}

pub fn build_app(config: ConfigV1) -> (Router, AppState) {
    let state = build_state(Arc::new(config)).expect("configuration store should open");
    (create_router(state.clone()), state)
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn post_form(path: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// The `name=value` pair from the response's `Set-Cookie`, ready to send back.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .filter(|pair| pair.starts_with(&format!("{}=", COOKIE_NAME)))
        .map(str::to_string)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}
