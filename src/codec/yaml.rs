use bytes::Bytes;
use serde_json::Value;

use super::{CONTENT_TYPE_YAML, Codec, CodecError, Options};

/// YAML, read into and written from the same value tree as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn content_type(&self) -> &str {
        CONTENT_TYPE_YAML
    }

    fn file_extension(&self) -> &str {
        "yaml"
    }

    fn marshal(&self, value: &Value, _options: &Options) -> Result<Bytes, CodecError> {
        Ok(Bytes::from(serde_yaml::to_string(value)?))
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_yaml::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_a_document() {
        let value = json!({"name": "widget", "sizes": [1, 2], "nested": {"on": true}});
        let bytes = YamlCodec.marshal(&value, &Options::new()).unwrap();
        assert_eq!(YamlCodec.unmarshal(&bytes).unwrap(), value);
    }

    #[test]
    fn reads_block_style_yaml() {
        let value = YamlCodec.unmarshal(b"name: widget\ncount: 2\n").unwrap();
        assert_eq!(value, json!({"name": "widget", "count": 2}));
    }
}
