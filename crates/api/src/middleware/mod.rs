//! Request authorization.
//!
//! - [`guard::access_guard`] -- the single chokepoint deciding
//!   allow/redirect for every page navigation.
//! - [`session::Session`] -- extracts a valid session (401 otherwise).
//! - [`session::RequireAdmin`] -- session plus admin email (403 otherwise).

pub mod guard;
pub mod session;
