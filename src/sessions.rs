//! Server-side session table.
//!
//! Clients hold only an opaque UUID in a cookie; the sign-in flag lives here.
//! Sessions do not expire and are lost on restart. The table holds at most
//! `max_sessions` entries: inserting beyond that drops the oldest session, so
//! clients that never sign out cannot grow it without bound.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::models::Session;

#[derive(Default)]
struct Table {
    next_seq: u64,
    entries: HashMap<String, (u64, Session)>,
}

pub struct SessionStore {
    max_sessions: usize,
    table: Mutex<Table>,
}

impl SessionStore {
    /// A table that keeps at most `max_sessions` sessions (at least one).
    pub fn new(max_sessions: usize) -> Self {
        SessionStore {
            max_sessions: max_sessions.max(1),
            table: Mutex::new(Table::default()),
        }
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.lock().entries.get(token).map(|(_, s)| s.clone())
    }

    /// Stores `session` under a freshly generated token and returns the token.
    pub fn insert(&self, session: Session) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let mut table = self.lock();

        while table.entries.len() >= self.max_sessions {
            let oldest = table
                .entries
                .iter()
                .min_by_key(|(_, (seq, _))| *seq)
                .map(|(token, _)| token.clone());
            match oldest {
                Some(oldest) => {
                    table.entries.remove(&oldest);
                    debug!("Session table full, dropped the oldest session");
                }
                None => break,
            }
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.entries.insert(token.clone(), (seq, session));
        token
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.lock().entries.remove(token).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
