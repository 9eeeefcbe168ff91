//! The module contains the implementation of the `Json` codec.
//! The codec stores records as JSON objects keyed by field name, so the
//! persisted form is stable under field reordering and the encode→decode
//! round trip is lossless.

use crate::codec::{
    Decode,
    Encode,
};
use std::borrow::Cow;

/// The codec is used to serialize/deserialize the types as JSON objects.
pub struct Json;

impl<T> Encode<T> for Json
where
    T: ?Sized + serde::Serialize,
{
    type Encoder<'a>
        = Cow<'a, [u8]>
    where
        T: 'a;

    fn encode(value: &T) -> Self::Encoder<'_> {
        Cow::Owned(serde_json::to_vec(value).expect(
            "It should be impossible to fail unless serialization is not \
             implemented, which is not true for our types.",
        ))
    }
}

impl<T> Decode<T> for Json
where
    T: serde::de::DeserializeOwned,
{
    fn decode(bytes: &[u8]) -> anyhow::Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
