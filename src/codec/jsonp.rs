//! Padded JSON: a JSON document wrapped in a call to a client-named function.

use bytes::{BufMut, Bytes, BytesMut};
use serde_json::Value;

use super::{CONTENT_TYPE_JSONP, Codec, CodecError, OPTION_CALLBACK, Options};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonpCodec;

impl JsonpCodec {
    fn callback_name(options: &Options) -> Result<&str, CodecError> {
        let name = options
            .get(OPTION_CALLBACK)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(CodecError::MissingCallback)?;

        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'));
        if !valid {
            return Err(CodecError::InvalidCallback(name.to_string()));
        }
        Ok(name)
    }
}

impl Codec for JsonpCodec {
    fn content_type(&self) -> &str {
        CONTENT_TYPE_JSONP
    }

    fn file_extension(&self) -> &str {
        "js"
    }

    fn supports_callback(&self) -> bool {
        true
    }

    fn marshal(&self, value: &Value, options: &Options) -> Result<Bytes, CodecError> {
        let callback = Self::callback_name(options)?;
        let body = serde_json::to_vec(value)?;

        let mut buf = BytesMut::with_capacity(callback.len() + body.len() + 3);
        buf.put_slice(callback.as_bytes());
        buf.put_u8(b'(');
        buf.put_slice(&body);
        buf.put_slice(b");");
        Ok(buf.freeze())
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(unwrap_callback(data))?)
    }
}

/// Strips an optional `name( ... )` wrapper and trailing `;`.
fn unwrap_callback(data: &[u8]) -> &[u8] {
    let data = data.trim_ascii();
    let data = data.strip_suffix(b";").unwrap_or(data).trim_ascii_end();

    let Some(open) = data.iter().position(|&b| b == b'(') else {
        return data;
    };
    let name = &data[..open];
    let is_name = !name.is_empty()
        && name
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'.'));
    match data.strip_suffix(b")") {
        Some(inner) if is_name => &inner[open + 1..],
        _ => data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_callback(name: &str) -> Options {
        Options::from([(OPTION_CALLBACK.to_string(), json!(name))])
    }

    #[test]
    fn wraps_output_in_callback() {
        let bytes = JsonpCodec
            .marshal(&json!({"ok": true}), &with_callback("handle"))
            .unwrap();
        assert_eq!(&bytes[..], b"handle({\"ok\":true});");
    }

    #[test]
    fn missing_callback_is_an_error() {
        let err = JsonpCodec.marshal(&json!(1), &Options::new()).unwrap_err();
        assert!(matches!(err, CodecError::MissingCallback));
    }

    #[test]
    fn rejects_script_injection_in_callback() {
        let err = JsonpCodec
            .marshal(&json!(1), &with_callback("alert(1);x"))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidCallback(name) if name == "alert(1);x"));
    }

    #[test]
    fn round_trips_through_wrapper() {
        let value = json!({"items": [1, 2, 3]});
        let bytes = JsonpCodec.marshal(&value, &with_callback("app.cb")).unwrap();
        assert_eq!(JsonpCodec.unmarshal(&bytes).unwrap(), value);
    }

    #[test]
    fn accepts_bare_json() {
        assert_eq!(JsonpCodec.unmarshal(b" [1, 2] ").unwrap(), json!([1, 2]));
    }
}
