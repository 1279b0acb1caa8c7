//! HTTP protocol implementation.
//!
//! One request per connection: the server reads a request, answers it and
//! closes. There is no keep-alive, pipelining or chunked encoding.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine
//! - **`parser`**: parses a request from a byte buffer
//! - **`request`**: the parsed request and its method
//! - **`headers`**, **`query`**, **`cookie`**: value objects built by the parser
//! - **`response`**: status codes and the response builder
//! - **`writer`**: serializes and writes a response
//! - **`mime`**: content types derived from file extensions
//! - **`error`**: the failure taxonomy every layer returns
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete request
//!        └──────┬──────┘
//!               │ Request parsed (or rejected)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch, or translate the failure
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │
//!               ▼
//!            Closed
//! ```
//!
//! A client that disconnects before sending a full request, or an I/O error
//! while reading, goes straight to `Closed` without a response.

pub mod connection;
pub mod cookie;
pub mod error;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod query;
pub mod request;
pub mod response;
pub mod writer;
