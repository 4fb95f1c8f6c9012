use bytes::Bytes;
use serde_json::Value;

use super::{CONTENT_TYPE_JSON, Codec, CodecError, Options};

/// Plain JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &str {
        CONTENT_TYPE_JSON
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn marshal(&self, value: &Value, _options: &Options) -> Result<Bytes, CodecError> {
        Ok(Bytes::from(serde_json::to_vec(value)?))
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}
