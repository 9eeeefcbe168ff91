//! Validated token amounts.
//!
//! An [`Amount`] is obtained either by parsing a base-10 integer literal or
//! through checked arithmetic on existing amounts, so every value of this
//! type is a validated non-negative integer. Raw request strings never reach
//! balance arithmetic.

use crate::services::ledger::Error;
use core::{
    fmt,
    str::FromStr,
};
use serde::{
    Deserialize,
    Serialize,
};

/// A validated, non-negative token amount.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);
    /// The largest representable amount.
    pub const MAX: Amount = Amount(u64::MAX);

    /// Parses a base-10 integer literal into a validated amount.
    ///
    /// Fails with [`Error::InvalidAmount`] when the input is not parseable
    /// as an integer, carries a fractional part, is negative, or exceeds the
    /// representable maximum.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        raw.parse::<u64>()
            .map(Amount)
            .map_err(|_| Error::InvalidAmount(raw.to_string()))
    }

    /// Adds `other` to the amount, returning `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Subtracts `other` from the amount, returning `None` if the result
    /// would be negative.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Returns `true` if this is the zero amount.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The raw integer value of the amount.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
