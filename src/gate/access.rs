use std::sync::Arc;

use tracing::{debug, info, warn};

use super::credential::{hash_password, verify_password};
use crate::error::GateError;
use crate::models::{ConfigRecord, Session, CREDENTIAL_KEY};
use crate::store::ConfigStore;

/// How a route is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Reachable once configured, whether signed in or not.
    Open,
    /// The one-shot setup form.
    Setup,
    /// The sign-in form.
    SignIn,
    /// Requires a signed-in session.
    Protected,
}

/// Where a rejected request is sent instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Setup,
    SignIn,
    Home,
}

impl Target {
    pub fn path(self) -> &'static str {
        match self {
            Target::Setup => "/setup",
            Target::SignIn => "/signin",
            Target::Home => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Proceed,
    Redirect(Target),
}

/// Combined installation and session state as seen by one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unconfigured,
    SignedOut,
    SignedIn,
}

impl GateState {
    pub fn of(record: &ConfigRecord, signed_in: bool) -> Self {
        match (record.is_setup_complete(), signed_in) {
            (false, _) => GateState::Unconfigured,
            (true, false) => GateState::SignedOut,
            (true, true) => GateState::SignedIn,
        }
    }
}

/// Decides whether a request for a route of `kind` may proceed.
pub fn authorize(record: &ConfigRecord, signed_in: bool, kind: RouteKind) -> Outcome {
    match (GateState::of(record, signed_in), kind) {
        (GateState::Unconfigured, RouteKind::Setup) => Outcome::Proceed,
        (GateState::Unconfigured, _) => Outcome::Redirect(Target::Setup),
        (_, RouteKind::Setup) => Outcome::Redirect(Target::SignIn),
        (GateState::SignedOut, RouteKind::Protected) => Outcome::Redirect(Target::SignIn),
        (GateState::SignedIn, RouteKind::SignIn) => Outcome::Redirect(Target::Home),
        _ => Outcome::Proceed,
    }
}

/// Enforces the setup → sign-in → console ordering for the installation.
pub struct AccessGate {
    store: Arc<ConfigStore>,
}

impl AccessGate {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        AccessGate { store }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn state(&self, session: &Session) -> GateState {
        GateState::of(&self.store.snapshot(), session.signed_in)
    }

    pub fn authorize(&self, kind: RouteKind, session: &Session) -> Outcome {
        let outcome = authorize(&self.store.snapshot(), session.signed_in, kind);
        debug!(?kind, ?outcome, "Gate decision");
        outcome
    }

    /// Stores the admin credential. Only succeeds once per installation.
    pub fn complete_setup(&self, password: &str) -> Result<(), GateError> {
        if password.is_empty() {
            debug!("Setup rejected: empty password");
            return Err(GateError::Validation("missing password"));
        }

        let hash = hash_password(password);
        self.store.update(|record| {
            if record.is_setup_complete() {
                warn!("Setup attempted after a credential was already stored");
                return Err(GateError::AlreadyConfigured);
            }
            record.insert(CREDENTIAL_KEY, hash);
            Ok(())
        })?;

        info!("Initial setup completed; admin credential stored");
        Ok(())
    }

    /// Verifies `password` and marks `session` signed in on a match.
    pub fn sign_in(&self, session: &mut Session, password: &str) -> Result<(), GateError> {
        let record = self.store.snapshot();
        let verified = record
            .credential_hash()
            .is_some_and(|stored| verify_password(password, stored));

        if !verified {
            warn!(
                setup_complete = record.is_setup_complete(),
                "Sign-in failed"
            );
            return Err(GateError::Authentication("invalid credentials"));
        }

        session.signed_in = true;
        info!("Sign-in succeeded");
        Ok(())
    }

    pub fn sign_out(&self, session: &mut Session) {
        session.signed_in = false;
    }
}
