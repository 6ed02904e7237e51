use chrono::{DateTime, Utc};

/// Per-client sign-in state.
///
/// The flag is only ever raised by `AccessGate::sign_in`, which refuses to do
/// so before a credential exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub signed_in: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A fresh, signed-out session.
    pub fn new() -> Self {
        Session {
            signed_in: false,
            created_at: Utc::now(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
