//! The module contains the implementation of the `Postcard` codec.
//! Any type that implements `serde::Serialize` and `serde::Deserialize`
//! can use the `Postcard` codec to be encoded/decoded into/from bytes.
//! The encoding length-prefixes variable-sized fields, so composite keys
//! like the `(asset, owner)` pair stay injective: distinct pairs can never
//! encode to the same bytes.

use crate::codec::{
    Decode,
    Encode,
};
use std::borrow::Cow;

/// The codec is used to serialize/deserialize the types that support
/// `serde::Serialize` and `serde::Deserialize`.
pub struct Postcard;

impl<T> Encode<T> for Postcard
where
    T: ?Sized + serde::Serialize,
{
    type Encoder<'a>
        = Cow<'a, [u8]>
    where
        T: 'a;

    fn encode(value: &T) -> Self::Encoder<'_> {
        Cow::Owned(postcard::to_allocvec(value).expect(
            "It should be impossible to fail unless serialization is not \
             implemented, which is not true for our types.",
        ))
    }
}

impl<T> Decode<T> for Postcard
where
    T: serde::de::DeserializeOwned,
{
    fn decode(bytes: &[u8]) -> anyhow::Result<T> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encoder;
    use token_ledger_types::{
        entities::balance::AccountKey,
        identifier::{
            AssetId,
            Owner,
        },
    };

    fn key(asset_id: &str, owner: &str) -> AccountKey {
        AccountKey::new(
            AssetId::new(asset_id).unwrap(),
            Owner::new(owner).unwrap(),
        )
    }

    #[test]
    fn account_keys_round_trip() {
        let key = key("gold", "alice");
        let bytes = Postcard::encode(&key).as_bytes().into_owned();
        let decoded: AccountKey =
            Postcard::decode(&bytes).expect("Should decode the key");
        assert_eq!(decoded, key);
    }

    #[test]
    fn ambiguous_identifier_pairs_encode_to_distinct_keys() {
        // A separator-based scheme would collapse these two accounts into
        // the same storage key.
        let first = Postcard::encode(&key("gold_a", "lice")).as_bytes().into_owned();
        let second = Postcard::encode(&key("gold", "a_lice")).as_bytes().into_owned();
        assert_ne!(first, second);
    }
}
