//! Minicat - a minimal HTTP/1.1 server
//!
//! Core library: request parsing, routing, server-side sessions and
//! response encoding.

pub mod app;
pub mod config;
pub mod http;
pub mod server;
pub mod session;
