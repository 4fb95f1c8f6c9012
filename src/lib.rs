//! webcodec - content negotiation for web codecs
//!
//! Picks the serialization format used to answer or interpret an HTTP
//! exchange from the Accept header, the requested file extension and whether
//! the client asked for a callback-wrapped (padded JSON) response.
//!
//! ```
//! use webcodec::negotiator::ContentNegotiator;
//!
//! let negotiator = ContentNegotiator::with_defaults();
//! let codec = negotiator
//!     .select_for_responding("application/x-yaml;q=0.5, application/json", "", false)
//!     .unwrap();
//! assert_eq!(codec.content_type(), "application/json");
//! ```

pub mod accept;
pub mod codec;
pub mod config;
pub mod error;
pub mod facade;
pub mod http;
pub mod negotiator;
pub mod server;

pub use error::{Error, Result};
