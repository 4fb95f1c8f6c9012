//! Minimal HTTP/1.1 front end for the codec service.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection request/response state machine
//! - **`parser`**: parses incoming requests from byte buffers
//! - **`request`**: request representation plus Accept, Content-Type,
//!   extension and query accessors
//! - **`handler`**: turns a request into a negotiated response
//! - **`response`**: response representation with builder
//! - **`writer`**: serializes and writes responses
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Negotiate codec, encode response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod connection;
pub mod handler;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
