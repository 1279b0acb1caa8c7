//! Server-side sessions
//!
//! A [`Session`] holds per-browser state keyed by an opaque identifier that
//! travels in the `JSESSIONID` cookie. The [`SessionStore`] is the only state
//! shared between connection tasks; it is cloned into each of them.

pub mod store;

pub use store::{Session, SessionStore};

/// Attribute key under which the logged-in user is stored.
pub const USER_ATTRIBUTE: &str = "user";
