//! Error types for codec negotiation.

use thiserror::Error;

use crate::codec::CodecError;

/// Errors surfaced by the negotiation layer.
#[derive(Error, Debug)]
pub enum Error {
    /// The registry holds no codecs; nothing can be negotiated.
    #[error("no codecs are installed - add some or use the default registry")]
    NoCodecsInstalled,

    /// No installed codec understands the given content type.
    #[error("content type \"{0}\" is not supported")]
    ContentTypeNotSupported(String),

    /// A configured codec name does not name a built-in codec.
    #[error("unknown codec \"{0}\"")]
    UnknownCodec(String),

    /// Producing the public representation of an object failed.
    #[error(transparent)]
    Projection(anyhow::Error),

    /// The codec itself failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result alias for negotiation operations.
pub type Result<T> = std::result::Result<T, Error>;
