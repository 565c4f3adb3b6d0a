//! bbuilds portal API server library.
//!
//! Exposes the building blocks (config, state, error handling, guard,
//! routes, roster store) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod roster;
pub mod routes;
pub mod state;
