//! Call-site props: which listing or challenge a selector is asked about

use civil_types::{ChallengeId, CivilResult, EthAddress};

/// Props of a listing-scoped view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingProps {
    pub listing_address: Option<EthAddress>,
}

impl ListingProps {
    pub fn new(listing_address: EthAddress) -> Self {
        Self {
            listing_address: Some(listing_address),
        }
    }

    /// Parse the address at the boundary
    pub fn parse(listing_address: &str) -> CivilResult<Self> {
        Ok(Self::new(EthAddress::parse(listing_address)?))
    }
}

/// Props of a challenge-scoped view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeProps {
    pub challenge_id: Option<ChallengeId>,
}

impl ChallengeProps {
    /// Accepts numeric ids directly; they normalize on conversion
    pub fn new(challenge_id: impl Into<ChallengeId>) -> Self {
        Self {
            challenge_id: Some(challenge_id.into()),
        }
    }

    /// Parse a decimal id string at the boundary
    pub fn parse(challenge_id: &str) -> CivilResult<Self> {
        Ok(Self {
            challenge_id: Some(ChallengeId::parse(challenge_id)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_props_agree() {
        assert_eq!(ChallengeProps::new(12u64), ChallengeProps::parse("012").unwrap());
        assert!(ChallengeProps::parse("twelve").is_err());
        assert_eq!(ChallengeProps::default().challenge_id, None);
    }
}
