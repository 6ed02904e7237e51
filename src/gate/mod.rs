//! The setup / sign-in gate in front of the management console.
//!
//! [`authorize`] is the pure decision function; [`AccessGate`] wraps it with
//! the configuration store and implements the credential transitions.

mod access;
pub mod credential;

pub use access::{authorize, AccessGate, GateState, Outcome, RouteKind, Target};
