//! Listing event history

use serde::{Deserialize, Serialize};

use crate::address::EthAddress;
use crate::ids::ChallengeId;
use crate::serde_helpers::token_amount;

/// Registry events that appear in a listing's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ListingEvent {
    #[serde(rename_all = "camelCase")]
    Application {
        applicant: EthAddress,
        #[serde(with = "token_amount")]
        deposit: u128,
        app_end_date: u64,
    },
    #[serde(rename_all = "camelCase")]
    Challenge {
        #[serde(rename = "challengeID")]
        challenge_id: ChallengeId,
        challenger: EthAddress,
        commit_end_date: u64,
        reveal_end_date: u64,
    },
    #[serde(rename_all = "camelCase")]
    ChallengeSucceeded {
        #[serde(rename = "challengeID")]
        challenge_id: ChallengeId,
        #[serde(with = "token_amount")]
        reward_pool: u128,
        #[serde(with = "token_amount")]
        total_tokens: u128,
    },
    #[serde(rename_all = "camelCase")]
    ChallengeFailed {
        #[serde(rename = "challengeID")]
        challenge_id: ChallengeId,
        #[serde(with = "token_amount")]
        reward_pool: u128,
        #[serde(with = "token_amount")]
        total_tokens: u128,
    },
    #[serde(rename_all = "camelCase")]
    AppealRequested {
        #[serde(rename = "challengeID")]
        challenge_id: ChallengeId,
        requester: EthAddress,
        #[serde(with = "token_amount")]
        appeal_fee_paid: u128,
    },
    #[serde(rename_all = "camelCase")]
    AppealGranted {
        #[serde(rename = "challengeID")]
        challenge_id: ChallengeId,
    },
    ApplicationWhitelisted,
    ApplicationRemoved,
    ListingRemoved,
    #[serde(rename_all = "camelCase")]
    Deposit {
        #[serde(with = "token_amount")]
        added: u128,
        #[serde(with = "token_amount")]
        new_total: u128,
    },
    #[serde(rename_all = "camelCase")]
    Withdrawal {
        #[serde(with = "token_amount")]
        withdrew: u128,
        #[serde(with = "token_amount")]
        new_total: u128,
    },
}

impl ListingEvent {
    /// Challenge the event refers to, if any
    pub fn challenge_id(&self) -> Option<&ChallengeId> {
        match self {
            ListingEvent::Challenge { challenge_id, .. }
            | ListingEvent::ChallengeSucceeded { challenge_id, .. }
            | ListingEvent::ChallengeFailed { challenge_id, .. }
            | ListingEvent::AppealRequested { challenge_id, .. }
            | ListingEvent::AppealGranted { challenge_id } => Some(challenge_id),
            _ => None,
        }
    }
}

/// An immutable historical fact, ordered by block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedEvent {
    pub timestamp: u64,
    #[serde(default)]
    pub block_number: u64,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(flatten)]
    pub event: ListingEvent,
}
