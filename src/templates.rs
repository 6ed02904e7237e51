//! Askama templates for the console pages.
//!
//! The real look and feel belongs to the front end; these pages only carry
//! the forms and navigation the gate needs. `location` names the page and
//! ends up on `<body data-location>`.

use askama::Template;
use axum::response::Html;
use chrono::{DateTime, Utc};

pub const MISSING_PASSWORD: &str = "ERROR: Missing password field";
pub const INVALID_CREDENTIALS: &str = "ERROR: Invalid credentials";

/// First-run form that sets the admin password.
#[derive(Template)]
#[template(path = "setup.html")]
pub struct SetupTemplate<'a> {
    pub location: &'static str,
    pub error: Option<&'a str>,
}

impl<'a> SetupTemplate<'a> {
    pub fn new(error: Option<&'a str>) -> Self {
        SetupTemplate {
            location: "setup",
            error,
        }
    }
}

/// Sign-in form.
#[derive(Template)]
#[template(path = "signin.html")]
pub struct SigninTemplate<'a> {
    pub location: &'static str,
    pub error: Option<&'a str>,
}

impl<'a> SigninTemplate<'a> {
    pub fn new(error: Option<&'a str>) -> Self {
        SigninTemplate {
            location: "signin",
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub location: &'static str,
}

#[derive(Template)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub location: &'static str,
}

/// Console settings, showing where the configuration record lives.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub location: &'static str,
    pub store_location: String,
    pub signed_in_since: DateTime<Utc>,
}

#[derive(Template)]
#[template(path = "palworld_settings.html")]
pub struct PalworldSettingsTemplate {
    pub location: &'static str,
}

/// Renders `template`, falling back to the error text if rendering fails.
pub fn render(template: &impl Template) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
}
