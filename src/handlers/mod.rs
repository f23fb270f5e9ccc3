//! Request handlers.
//!
//! `projects` is the function itself; `health` only exists on the local server.
/// Liveness endpoint
pub mod health;
/// Project listing
pub mod projects;
