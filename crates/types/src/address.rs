//! Ethereum account and contract addresses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CivilError;

/// Number of hex digits in a 20-byte address
const ADDRESS_HEX_LEN: usize = 40;

/// A 20-byte address in canonical lowercase `0x` form.
///
/// Checksummed (mixed case) input is accepted and folded to lowercase so that
/// map lookups never depend on the casing a wallet happened to report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EthAddress(String);

impl EthAddress {
    /// Parse and normalize an address
    pub fn parse(value: &str) -> Result<Self, CivilError> {
        let trimmed = value.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| CivilError::invalid_address(value, "missing 0x prefix"))?;

        if hex.len() != ADDRESS_HEX_LEN {
            return Err(CivilError::invalid_address(value, "expected 40 hex digits"));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CivilError::invalid_address(value, "non-hex character"));
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// The all-zero address, used on chain for "unset"
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(ADDRESS_HEX_LEN)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EthAddress {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for EthAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for EthAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EthAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EthAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}
