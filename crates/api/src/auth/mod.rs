//! Session-token validation and admin email resolution.
//!
//! - [`session`] -- HS256 session token claims, validation, and extraction
//!   from request headers.
//! - [`resolver`] -- resolves a session's email with two strategies in
//!   fixed order and decides admin status, failing closed.

pub mod resolver;
pub mod session;
