//! Challenge identifiers
//!
//! Poll and challenge ids are uint256 on chain and reach the client either as
//! JSON numbers or as decimal strings. Both are folded into one canonical
//! decimal string at ingestion so that lookups never branch on the input type.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CivilError;

/// Canonical decimal challenge identifier. `"0"` means "no challenge".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChallengeId(String);

impl ChallengeId {
    /// Parse a decimal string, stripping leading zeros
    pub fn parse(value: &str) -> Result<Self, CivilError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CivilError::invalid_challenge_id(value));
        }

        let digits = trimmed.trim_start_matches('0');
        if digits.is_empty() {
            Ok(Self::none())
        } else {
            Ok(Self(digits.to_string()))
        }
    }

    /// The zero id the registry uses for "no challenge"
    pub fn none() -> Self {
        Self("0".to_string())
    }

    pub fn is_none(&self) -> bool {
        self.0 == "0"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChallengeId {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChallengeId {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for ChallengeId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for ChallengeId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for ChallengeId {
    fn from(value: u128) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<&str> for ChallengeId {
    type Error = CivilError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ChallengeId {
    type Error = CivilError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// Numeric ordering so that "10" sorts after "9".
impl Ord for ChallengeId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ChallengeId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for ChallengeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

struct ChallengeIdVisitor;

impl<'de> Visitor<'de> for ChallengeIdVisitor {
    type Value = ChallengeId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or decimal string")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ChallengeId::from(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value)
            .map(ChallengeId::from)
            .map_err(|_| E::custom(CivilError::invalid_challenge_id(&value.to_string())))
    }

    fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ChallengeId::from(value))
    }

    // Integers past u64 reach here as floats unless the dump quotes them
    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(E::custom(CivilError::invalid_challenge_id(&value.to_string())))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ChallengeId::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for ChallengeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ChallengeIdVisitor)
    }
}
