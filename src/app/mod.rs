//! Application layer
//!
//! Routing, the collaborators routes call into, and the translation of
//! failures into redirect responses.

pub mod auth;
pub mod exception;
pub mod resources;
pub mod router;

pub use auth::{AccountService, InMemoryAccounts, User};
pub use resources::{ResourceResolver, StaticFiles};
pub use router::Router;
