//! Library exports for palbox, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod routes;
pub mod sessions;
pub mod startup;
pub mod state;
pub mod store;
pub mod templates;
pub mod utils;
