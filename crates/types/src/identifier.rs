//! Opaque string identifiers for asset classes and account owners.
//!
//! Both identifiers are validated on construction: the ledger never accepts
//! an empty asset or owner, so every value of these types names something.

use crate::services::ledger::Error;
use core::fmt;
use serde::{
    Deserialize,
    Serialize,
};

macro_rules! string_identifier {
    ($ty:ident, $what:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(try_from = "String")]
        pub struct $ty(String);

        impl $ty {
            /// Creates the identifier, rejecting empty strings.
            pub fn new(value: impl Into<String>) -> Result<Self, Error> {
                let value = value.into();
                if value.is_empty() {
                    return Err(Error::InvalidArgument(
                        concat!($what, " must not be empty").to_string(),
                    ));
                }
                Ok(Self(value))
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(value: String) -> Result<Self, Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self, Error> {
                Self::new(value)
            }
        }
    };
}

string_identifier!(
    AssetId,
    "the asset identifier",
    "The identifier of a class of fungible token."
);
string_identifier!(
    Owner,
    "the owner identifier",
    "The identifier of an account holding balances of assets."
);
