//! Arbitrary-precision unsigned integers.
//!
//! On-chain governors use `uint256` for proposal ids, vote weights and
//! parameter values. Sums of many weights may exceed 256 bits, so every such
//! quantity is backed by [`BigUint`] and never by a native integer.
//!
//! Both types serialize as decimal strings. Parsing also accepts a
//! `0x`-prefixed hexadecimal form, which is how some event sources render
//! `uint256` values.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::TypesError;

/// An unsigned integer of unbounded width.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint(BigUint);

impl Uint {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for Uint {
    fn from(v: BigUint) -> Self {
        Self(v)
    }
}

impl From<u64> for Uint {
    fn from(v: u64) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<u128> for Uint {
    fn from(v: u128) -> Self {
        Self(BigUint::from(v))
    }
}

impl FromStr for Uint {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
            None => BigUint::parse_bytes(trimmed.as_bytes(), 10),
        };
        parsed
            .map(Self)
            .ok_or_else(|| TypesError::InvalidInteger(s.to_string()))
    }
}

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<&Uint> for &Uint {
    type Output = Uint;

    fn add(self, rhs: &Uint) -> Uint {
        Uint(&self.0 + &rhs.0)
    }
}

impl AddAssign<&Uint> for Uint {
    fn add_assign(&mut self, rhs: &Uint) {
        self.0 += &rhs.0;
    }
}

impl Serialize for Uint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Uint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of a governance proposal.
///
/// The governor derives it by hashing the proposal's calls, so it is unique
/// per proposal but carries no ordering meaning. Stores key proposals by its
/// decimal rendering (see [`ProposalId::key`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(Uint);

impl ProposalId {
    pub fn new(value: Uint) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Uint {
        &self.0
    }

    /// Canonical store key: the decimal string of the id.
    pub fn key(&self) -> String {
        self.0.to_string()
    }
}

impl From<u64> for ProposalId {
    fn from(v: u64) -> Self {
        Self(Uint::from(v))
    }
}

impl From<Uint> for ProposalId {
    fn from(v: Uint) -> Self {
        Self(v)
    }
}

impl FromStr for ProposalId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uint::from_str(s).map(Self)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
