//! Registry of installed codecs
//!
//! The registry keeps codecs in registration order. Readers take a snapshot
//! of the whole sequence; `add` publishes a new sequence atomically, so a
//! negotiation running concurrently with registration sees either the old or
//! the new list, never a partial one.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{SharedCodec, codec_by_name, default_codecs};
use crate::error::{Error, Result};

/// Ordered, append-only collection of codecs
pub struct CodecRegistry {
    codecs: ArcSwap<Vec<SharedCodec>>,
}

impl CodecRegistry {
    /// Create a registry holding `codecs` in the given order
    pub fn new(codecs: Vec<SharedCodec>) -> Self {
        Self {
            codecs: ArcSwap::from_pointee(codecs),
        }
    }

    /// Registry with the built-in JSON, padded JSON and YAML codecs
    pub fn defaults() -> Self {
        Self::new(default_codecs())
    }

    /// Build a registry from built-in codec names such as `json` or `yaml`
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let codecs = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                codec_by_name(name).ok_or_else(|| Error::UnknownCodec(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(codecs))
    }

    /// Snapshot of the installed codecs in registration order
    pub fn codecs(&self) -> Arc<Vec<SharedCodec>> {
        self.codecs.load_full()
    }

    /// Append a codec. No deduplication or validation is performed.
    pub fn add(&self, codec: SharedCodec) {
        self.codecs.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Arc::clone(&codec));
            next
        });
        tracing::debug!(
            content_type = codec.content_type(),
            extension = codec.file_extension(),
            "Codec registered"
        );
    }

    /// Fail with [`Error::NoCodecsInstalled`] when nothing is registered
    pub fn assert_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::NoCodecsInstalled);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.codecs.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.load().is_empty()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::defaults()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.codecs().iter()).finish()
    }
}
