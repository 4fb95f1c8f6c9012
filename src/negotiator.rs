//! Content negotiation
//!
//! Picks the codec used to answer a request, or to read its payload.

use std::sync::Arc;

use crate::accept::{AcceptClause, clauses_in_order, group_by_priority};
use crate::codec::{CONTENT_TYPE_JSON, CONTENT_TYPE_JSONP, CodecRegistry, SharedCodec};
use crate::error::{Error, Result};

/// Content types with special meaning during negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationSettings {
    /// Codec used for payloads that arrive without a Content-Type
    pub default_content_type: String,
    /// Codec that always answers requests asking for a callback
    pub callback_content_type: String,
}

impl Default for NegotiationSettings {
    fn default() -> Self {
        Self {
            default_content_type: CONTENT_TYPE_JSON.to_string(),
            callback_content_type: CONTENT_TYPE_JSONP.to_string(),
        }
    }
}

/// Selects codecs from a registry it owns for the life of the service
#[derive(Debug)]
pub struct ContentNegotiator {
    registry: CodecRegistry,
    settings: NegotiationSettings,
}

impl ContentNegotiator {
    /// Create a negotiator. An empty registry is rejected here rather than
    /// on the first request.
    pub fn new(registry: CodecRegistry, settings: NegotiationSettings) -> Result<Self> {
        registry.assert_non_empty()?;
        Ok(Self { registry, settings })
    }

    /// Negotiator over the built-in codecs with default settings
    pub fn with_defaults() -> Self {
        Self {
            registry: CodecRegistry::defaults(),
            settings: NegotiationSettings::default(),
        }
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &NegotiationSettings {
        &self.settings
    }

    /// Choose the codec used to respond.
    ///
    /// Precedence, first match wins:
    /// 1. with a callback, the codec for the callback content type;
    /// 2. the Accept header, by descending priority then header order;
    /// 3. the first codec matching `extension`, or with a callback, the first
    ///    codec able to wrap one;
    /// 4. the first registered codec.
    ///
    /// Only fails when the registry is empty.
    pub fn select_for_responding(
        &self,
        accept: &str,
        extension: &str,
        has_callback: bool,
    ) -> Result<SharedCodec> {
        self.registry.assert_non_empty()?;
        let codecs = self.registry.codecs();

        if has_callback {
            if let Some(codec) = codecs
                .iter()
                .find(|codec| codec.content_type().eq_ignore_ascii_case(&self.settings.callback_content_type))
            {
                tracing::debug!(codec = codec.content_type(), "Selected callback codec");
                return Ok(Arc::clone(codec));
            }
        }

        let groups = group_by_priority(accept);
        for clause in clauses_in_order(&groups) {
            if let Some(codec) = find_for_clause(&codecs, clause) {
                tracing::debug!(
                    codec = codec.content_type(),
                    clause = %clause.media_type,
                    priority = clause.priority,
                    "Selected codec from Accept header"
                );
                return Ok(Arc::clone(codec));
            }
        }

        let by_extension = codecs.iter().find(|codec| {
            // An empty extension matches nothing, not even a codec without one.
            (!extension.is_empty() && codec.file_extension().eq_ignore_ascii_case(extension))
                || (has_callback && codec.supports_callback())
        });
        if let Some(codec) = by_extension {
            tracing::debug!(
                codec = codec.content_type(),
                extension,
                has_callback,
                "Selected codec by extension"
            );
            return Ok(Arc::clone(codec));
        }

        let fallback = &codecs[0];
        tracing::debug!(
            codec = fallback.content_type(),
            accept,
            extension,
            "No preference matched, using first installed codec"
        );
        Ok(Arc::clone(fallback))
    }

    /// Choose the codec used to read a payload of the given content type.
    ///
    /// A codec matches when its content type appears anywhere in
    /// `content_type`, so `application/json; charset=utf-8` selects the JSON
    /// codec. An empty content type selects the default codec.
    pub fn select_for_interpreting(&self, content_type: &str) -> Result<SharedCodec> {
        self.registry.assert_non_empty()?;
        let codecs = self.registry.codecs();

        let selected = if content_type.trim().is_empty() {
            codecs.iter().find(|codec| {
                codec
                    .content_type()
                    .eq_ignore_ascii_case(&self.settings.default_content_type)
            })
        } else {
            let wanted = content_type.to_ascii_lowercase();
            codecs.iter().find(|codec| {
                let own = codec.content_type().to_ascii_lowercase();
                !own.is_empty() && wanted.contains(&own)
            })
        };

        match selected {
            Some(codec) => {
                tracing::debug!(codec = codec.content_type(), content_type, "Selected codec for payload");
                Ok(Arc::clone(codec))
            }
            None => {
                tracing::debug!(content_type, "Content type not supported");
                Err(Error::ContentTypeNotSupported(content_type.to_string()))
            }
        }
    }
}

/// First codec matching a clause: candidates in order, each scanned against the
/// whole registry. `*/*` never matches; `type/*` matches by category.
fn find_for_clause<'a>(codecs: &'a [SharedCodec], clause: &AcceptClause) -> Option<&'a SharedCodec> {
    if clause.is_full_wildcard() {
        return None;
    }
    if let Some(category) = clause.wildcard_category() {
        return codecs.iter().find(|codec| {
            codec
                .content_type()
                .split_once('/')
                .is_some_and(|(own, _)| own.eq_ignore_ascii_case(category))
        });
    }
    clause.content_types.iter().find_map(|candidate| {
        codecs
            .iter()
            .find(|codec| codec.content_type().eq_ignore_ascii_case(candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, CodecError, JsonCodec, JsonpCodec, Options, YamlCodec};
    use bytes::Bytes;
    use serde_json::Value;

    /// Codec stub identified only by its content type and extension.
    struct Stub {
        content_type: &'static str,
        extension: &'static str,
        callback: bool,
    }

    impl Codec for Stub {
        fn content_type(&self) -> &str {
            self.content_type
        }

        fn file_extension(&self) -> &str {
            self.extension
        }

        fn supports_callback(&self) -> bool {
            self.callback
        }

        fn marshal(&self, _value: &Value, _options: &Options) -> std::result::Result<Bytes, CodecError> {
            Ok(Bytes::new())
        }

        fn unmarshal(&self, _data: &[u8]) -> std::result::Result<Value, CodecError> {
            Ok(Value::Null)
        }
    }

    fn stub(content_type: &'static str, extension: &'static str) -> SharedCodec {
        Arc::new(Stub {
            content_type,
            extension,
            callback: false,
        })
    }

    fn negotiator(codecs: Vec<SharedCodec>) -> ContentNegotiator {
        ContentNegotiator::new(CodecRegistry::new(codecs), NegotiationSettings::default()).unwrap()
    }

    fn responding(n: &ContentNegotiator, accept: &str, ext: &str, callback: bool) -> String {
        n.select_for_responding(accept, ext, callback)
            .unwrap()
            .content_type()
            .to_string()
    }

    #[test]
    fn empty_registry_is_rejected_at_construction() {
        let err = ContentNegotiator::new(CodecRegistry::new(Vec::new()), NegotiationSettings::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoCodecsInstalled));
    }

    #[test]
    fn suffix_candidate_matches_base_codec() {
        let n = negotiator(vec![stub("application/xml", "xml"), Arc::new(JsonCodec)]);
        assert_eq!(responding(&n, "application/vnd.api+json", "", false), "application/json");
    }

    #[test]
    fn category_less_codec_matches_stripped_subtype() {
        let n = negotiator(vec![stub("application/xml", "xml"), stub("csv", "csv")]);
        assert_eq!(responding(&n, "text/csv", "", false), "csv");
    }

    #[test]
    fn candidate_order_beats_registry_order() {
        // The clause's exact spelling wins even though the suffix codec is registered first.
        let n = negotiator(vec![Arc::new(JsonCodec), stub("application/vnd.api+json", "api")]);
        assert_eq!(responding(&n, "application/vnd.api+json", "", false), "application/vnd.api+json");
    }

    #[test]
    fn accept_matching_ignores_case() {
        let n = negotiator(vec![stub("application/xml", "xml"), Arc::new(JsonCodec)]);
        assert_eq!(responding(&n, "Application/JSON", "", false), "application/json");
    }

    #[test]
    fn full_wildcard_defers_to_extension() {
        let n = negotiator(vec![Arc::new(JsonCodec), Arc::new(YamlCodec)]);
        assert_eq!(responding(&n, "*/*", "yaml", false), "application/x-yaml");
        assert_eq!(responding(&n, "text/html, */*;q=0.8", "", false), "application/json");
    }

    #[test]
    fn category_wildcard_matches_first_codec_in_category() {
        let n = negotiator(vec![Arc::new(JsonCodec), stub("text/csv", "csv"), stub("text/plain", "txt")]);
        assert_eq!(responding(&n, "text/*", "", false), "text/csv");
        assert_eq!(responding(&n, "image/*", "txt", false), "text/plain");
    }

    #[test]
    fn callback_codec_found_by_step_three_when_type_differs() {
        let n = ContentNegotiator::new(
            CodecRegistry::new(vec![
                Arc::new(JsonCodec),
                Arc::new(Stub {
                    content_type: "application/javascript",
                    extension: "js",
                    callback: true,
                }),
            ]),
            NegotiationSettings::default(),
        )
        .unwrap();
        assert_eq!(responding(&n, "text/unknown", "", true), "application/javascript");
    }

    #[test]
    fn custom_callback_content_type_is_honoured() {
        let settings = NegotiationSettings {
            callback_content_type: "application/javascript".to_string(),
            ..NegotiationSettings::default()
        };
        let n = ContentNegotiator::new(
            CodecRegistry::new(vec![Arc::new(JsonpCodec), stub("application/javascript", "js")]),
            settings,
        )
        .unwrap();
        assert_eq!(responding(&n, "", "", true), "application/javascript");
    }

    #[test]
    fn empty_extension_never_matches() {
        let n = negotiator(vec![Arc::new(JsonCodec), stub("application/octet-stream", "")]);
        assert_eq!(responding(&n, "", "", false), "application/json");
    }

    #[test]
    fn interpreting_skips_codecs_without_content_type() {
        let n = negotiator(vec![stub("", "bin"), Arc::new(JsonCodec)]);
        let codec = n.select_for_interpreting("application/json").unwrap();
        assert_eq!(codec.content_type(), "application/json");
    }

    #[test]
    fn interpreting_empty_without_default_codec_fails() {
        let n = negotiator(vec![Arc::new(YamlCodec)]);
        let err = n.select_for_interpreting("").unwrap_err();
        assert!(matches!(err, Error::ContentTypeNotSupported(value) if value.is_empty()));
    }
}
