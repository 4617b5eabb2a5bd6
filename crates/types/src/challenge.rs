//! # Challenge Types
//!
//! On-chain shaped records for challenges, their commit/reveal polls and the
//! appeal process layered on top. Timestamps are unix seconds; token amounts
//! are base units.

use serde::{Deserialize, Serialize};

use crate::address::EthAddress;
use crate::ids::ChallengeId;
use crate::serde_helpers::token_amount;

/// Commit/reveal poll backing a challenge or an appeal challenge
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollData {
    /// End of the commit stage
    pub commit_end_date: u64,
    /// End of the reveal stage
    pub reveal_end_date: u64,
    /// Percentage of "for" votes needed to pass
    pub vote_quorum: u8,
    #[serde(with = "token_amount", default)]
    pub votes_for: u128,
    #[serde(with = "token_amount", default)]
    pub votes_against: u128,
}

impl PollData {
    pub fn total_votes(&self) -> u128 {
        self.votes_for.saturating_add(self.votes_against)
    }
}

/// A challenge raised against a granted appeal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealChallengeData {
    pub challenger: EthAddress,
    #[serde(with = "token_amount", default)]
    pub reward_pool: u128,
    #[serde(with = "token_amount", default)]
    pub stake: u128,
    pub resolved: bool,
    #[serde(with = "token_amount", default)]
    pub total_tokens: u128,
    pub poll: PollData,
}

/// An appeal to the council after a challenge vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealData {
    pub requester: EthAddress,
    #[serde(with = "token_amount", default)]
    pub appeal_fee_paid: u128,
    /// End of the council's judgment window
    pub appeal_phase_expiry: u64,
    pub appeal_granted: bool,
    /// End of the window in which a granted appeal can be challenged.
    /// Zero until the appeal is granted.
    #[serde(default)]
    pub appeal_open_to_challenge_expiry: u64,
    #[serde(default)]
    pub appeal_challenge_id: Option<ChallengeId>,
    #[serde(default)]
    pub appeal_challenge: Option<AppealChallengeData>,
}

/// A challenge against a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeData {
    pub challenger: EthAddress,
    #[serde(with = "token_amount", default)]
    pub reward_pool: u128,
    #[serde(with = "token_amount", default)]
    pub stake: u128,
    pub resolved: bool,
    #[serde(with = "token_amount", default)]
    pub total_tokens: u128,
    pub poll: PollData,
    /// End of the window in which the losing side may request an appeal
    pub request_appeal_expiry: u64,
    /// At most one appeal per challenge
    #[serde(default)]
    pub appeal: Option<AppealData>,
}

/// A challenge together with the listing it targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedChallengeData {
    pub listing_address: EthAddress,
    #[serde(rename = "challengeID")]
    pub challenge_id: ChallengeId,
    pub challenge: ChallengeData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dapp_shape() {
        let json = r#"{
            "listingAddress": "0x00000000000000000000000000000000000000aa",
            "challengeID": 5,
            "challenge": {
                "challenger": "0x00000000000000000000000000000000000000bb",
                "rewardPool": "500",
                "stake": "1000",
                "resolved": false,
                "totalTokens": "0",
                "poll": {
                    "commitEndDate": 100,
                    "revealEndDate": 200,
                    "voteQuorum": 50,
                    "votesFor": "30",
                    "votesAgainst": "70"
                },
                "requestAppealExpiry": 300
            }
        }"#;

        let wrapped: WrappedChallengeData = serde_json::from_str(json).unwrap();
        assert_eq!(wrapped.challenge_id, ChallengeId::from(5u64));
        assert_eq!(wrapped.challenge.poll.total_votes(), 100);
        assert!(wrapped.challenge.appeal.is_none());
    }
}
