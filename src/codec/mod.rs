//! Codec capability and the built-in codecs.
//!
//! A codec turns a [`Value`] tree into bytes for one content type and back.
//! The negotiation layer only ever sees codecs through the [`Codec`] trait;
//! the implementations here are reference adapters over `serde_json` and
//! `serde_yaml`.
//!
//! | Codec          | Content type          | Extension | Callback |
//! |----------------|-----------------------|-----------|----------|
//! | [`JsonCodec`]  | `application/json`    | `json`    | no       |
//! | [`JsonpCodec`] | `text/javascript`     | `js`      | yes      |
//! | [`YamlCodec`]  | `application/x-yaml`  | `yaml`    | no       |

pub mod json;
pub mod jsonp;
pub mod registry;
pub mod yaml;

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

pub use json::JsonCodec;
pub use jsonp::JsonpCodec;
pub use registry::CodecRegistry;
pub use yaml::YamlCodec;

/// Content type of plain JSON, the default for payloads without a Content-Type.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type of padded JSON, the designated callback-capable format.
pub const CONTENT_TYPE_JSONP: &str = "text/javascript";
pub const CONTENT_TYPE_YAML: &str = "application/x-yaml";

/// Option key holding the callback name for callback-wrapping codecs.
pub const OPTION_CALLBACK: &str = "callback";

/// Options passed through to a codec's marshal step.
pub type Options = HashMap<String, Value>;

/// Codec shared between the registry and its callers.
pub type SharedCodec = Arc<dyn Codec>;

/// Errors produced by codecs.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A callback-wrapping codec was asked to marshal without a callback name.
    #[error("no callback name was given in the marshal options")]
    MissingCallback,

    #[error("invalid callback name {0:?}")]
    InvalidCallback(String),

    /// Failure reported by a codec outside this crate.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A serialization format for one content type.
pub trait Codec: Send + Sync {
    /// Media type this codec produces and understands, e.g. `application/json`.
    fn content_type(&self) -> &str;

    /// File extension associated with the format, without the leading dot.
    fn file_extension(&self) -> &str;

    /// Whether the codec can wrap its output in a caller-supplied callback.
    fn supports_callback(&self) -> bool {
        false
    }

    fn marshal(&self, value: &Value, options: &Options) -> Result<Bytes, CodecError>;

    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError>;
}

impl std::fmt::Debug for dyn Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("content_type", &self.content_type())
            .field("file_extension", &self.file_extension())
            .finish()
    }
}

/// Builds a built-in codec from its configuration name.
pub fn codec_by_name(name: &str) -> Option<SharedCodec> {
    match name.trim().to_ascii_lowercase().as_str() {
        "json" => Some(Arc::new(JsonCodec)),
        "jsonp" => Some(Arc::new(JsonpCodec)),
        "yaml" | "yml" => Some(Arc::new(YamlCodec)),
        _ => None,
    }
}

/// The codecs installed when nothing else is configured, in lookup order.
pub fn default_codecs() -> Vec<SharedCodec> {
    vec![Arc::new(JsonCodec), Arc::new(JsonpCodec), Arc::new(YamlCodec)]
}
