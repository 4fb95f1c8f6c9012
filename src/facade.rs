//! Marshalling through a public projection.
//!
//! Objects handed to [`ContentNegotiator::marshal_with`] may expose a public
//! representation, an external-safe view that is marshalled instead of the
//! object itself. The capability is optional: [`Facade::as_public_data`]
//! returns `None` for objects that marshal as they are.

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::codec::{Codec, CodecError, Options};
use crate::error::{Error, Result};
use crate::negotiator::ContentNegotiator;

/// Capability of producing an external-safe view of an object.
pub trait PublicData {
    fn public_data(&self, options: &Options) -> anyhow::Result<Value>;
}

/// Anything the facade can marshal.
pub trait Facade {
    /// The object as it is, without projection.
    fn raw_data(&self) -> anyhow::Result<Value>;

    /// The public projection capability, if the object has one.
    fn as_public_data(&self) -> Option<&dyn PublicData> {
        None
    }
}

impl Facade for Value {
    fn raw_data(&self) -> anyhow::Result<Value> {
        Ok(self.clone())
    }
}

/// Marshals any serializable value as it is.
#[derive(Debug, Clone)]
pub struct Raw<T>(pub T);

impl<T: Serialize> Facade for Raw<T> {
    fn raw_data(&self) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(&self.0)?)
    }
}

/// Marshals a value through its public projection.
#[derive(Debug, Clone)]
pub struct Public<T>(pub T);

impl<T: Serialize + PublicData> Facade for Public<T> {
    fn raw_data(&self) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(&self.0)?)
    }

    fn as_public_data(&self) -> Option<&dyn PublicData> {
        Some(&self.0)
    }
}

/// The value to marshal for `object`: its projection when it has one, the
/// object itself otherwise.
pub fn public_data(object: &dyn Facade, options: &Options) -> Result<Value> {
    let data = match object.as_public_data() {
        Some(projection) => projection.public_data(options),
        None => object.raw_data(),
    };
    data.map_err(Error::Projection)
}

impl ContentNegotiator {
    /// Marshal `object` with `codec`, substituting its public projection.
    pub fn marshal_with(&self, codec: &dyn Codec, object: &dyn Facade, options: &Options) -> Result<Bytes> {
        self.registry().assert_non_empty()?;

        let data = public_data(object, options)?;
        Ok(codec.marshal(&data, options)?)
    }

    /// Read `data` with `codec` into a value tree.
    pub fn unmarshal_with(&self, codec: &dyn Codec, data: &[u8]) -> Result<Value> {
        self.registry().assert_non_empty()?;

        Ok(codec.unmarshal(data)?)
    }

    /// Read `data` with `codec` into the caller's target type.
    pub fn unmarshal_into<T: DeserializeOwned>(&self, codec: &dyn Codec, data: &[u8]) -> Result<T> {
        let value = self.unmarshal_with(codec, data)?;
        serde_json::from_value(value).map_err(|e| Error::Codec(CodecError::Json(e)))
    }
}
