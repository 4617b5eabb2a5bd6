//! # Listing Types
//!
//! A listing is a newsroom's entry in the registry. The sync layer wraps the
//! on-chain record with the address it lives at and a precomputed expiry of
//! whatever timed phase the listing is currently in.

use serde::{Deserialize, Serialize};

use crate::address::EthAddress;
use crate::challenge::ChallengeData;
use crate::errors::CivilError;
use crate::ids::ChallengeId;
use crate::serde_helpers::token_amount;
use crate::CivilResult;

/// Registry record for one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingData {
    pub owner: EthAddress,
    pub is_whitelisted: bool,
    /// End of the application stage; zero if the listing never applied
    pub app_expiry: u64,
    #[serde(with = "token_amount", default)]
    pub unstaked_deposit: u128,
    /// Current or most recent challenge; zero when none
    #[serde(rename = "challengeID", default)]
    pub challenge_id: ChallengeId,
    #[serde(default)]
    pub challenge: Option<ChallengeData>,
}

impl ListingData {
    /// Check that the challenge reference and the embedded record agree
    pub fn validate(&self) -> CivilResult<()> {
        if self.challenge_id.is_none() && self.challenge.is_some() {
            return Err(CivilError::inconsistent(
                "listing",
                &self.owner,
                "challenge record present with zero challenge id",
            ));
        }
        Ok(())
    }

    pub fn has_unresolved_challenge(&self) -> bool {
        self.challenge.as_ref().map_or(false, |c| !c.resolved)
    }
}

/// A listing record keyed by its contract address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingWrapper {
    pub address: EthAddress,
    pub data: ListingData,
}

/// Listing wrapper as held in the snapshot.
///
/// `expiry` is `Some` exactly while the listing sits in a timed phase
/// (application, or any stage of a live challenge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingWrapperWithExpiry {
    pub listing: ListingWrapper,
    #[serde(default)]
    pub expiry: Option<u64>,
}

/// Denormalized history facts maintained by the event indexer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingExtendedMetadata {
    #[serde(rename = "latestChallengeID", default)]
    pub latest_challenge_id: Option<ChallengeId>,
    #[serde(default)]
    pub listing_removed_timestamp: Option<u64>,
    #[serde(default)]
    pub whitelisted_timestamp: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_json(challenge_id: &str) -> String {
        format!(
            r#"{{
                "owner": "0x00000000000000000000000000000000000000aa",
                "isWhitelisted": true,
                "appExpiry": 1000,
                "unstakedDeposit": "100",
                "challengeID": "{}"
            }}"#,
            challenge_id
        )
    }

    #[test]
    fn test_listing_without_challenge() {
        let data: ListingData = serde_json::from_str(&listing_json("0")).unwrap();
        assert!(data.challenge_id.is_none());
        assert!(!data.has_unresolved_challenge());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_extended_metadata_defaults() {
        let meta: ListingExtendedMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta, ListingExtendedMetadata::default());

        let meta: ListingExtendedMetadata =
            serde_json::from_str(r#"{"latestChallengeID": 9, "whitelistedTimestamp": 77}"#).unwrap();
        assert_eq!(meta.latest_challenge_id, Some(ChallengeId::from(9u64)));
        assert_eq!(meta.whitelisted_timestamp, Some(77));
        assert_eq!(meta.listing_removed_timestamp, None);
    }
}
