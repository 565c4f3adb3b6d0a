//! Domain types and the project roster editing model for the bbuilds
//! client portal.
//!
//! This crate is free of HTTP and database dependencies. The roster editor
//! talks to storage through the [`roster::RosterStore`] trait, which the API
//! crate implements over the Roster API and tests implement in memory.

pub mod error;
pub mod roster;
pub mod types;
