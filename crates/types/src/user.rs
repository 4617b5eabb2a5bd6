//! Per-user state: the connected account and its voting history

use serde::{Deserialize, Serialize};

use crate::address::EthAddress;
use crate::errors::CivilError;
use crate::ids::ChallengeId;
use crate::serde_helpers::token_amount;
use crate::CivilResult;

/// The connected wallet account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub account: EthAddress,
    #[serde(with = "token_amount", default)]
    pub balance: u128,
    #[serde(with = "token_amount", default)]
    pub voting_balance: u128,
}

/// User slice of the snapshot; `account` is `None` until a wallet connects
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserAccountState {
    #[serde(default)]
    pub account: Option<UserAccount>,
}

impl UserAccountState {
    pub fn connected(account: UserAccount) -> Self {
        Self {
            account: Some(account),
        }
    }

    pub fn address(&self) -> Option<&EthAddress> {
        self.account.as_ref().map(|a| &a.account)
    }
}

/// One user's interaction with one challenge
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChallengeData {
    #[serde(default)]
    pub did_user_commit: bool,
    #[serde(default)]
    pub did_user_reveal: bool,
    #[serde(default)]
    pub did_user_collect: bool,
    #[serde(default)]
    pub is_voter_winner: bool,
    /// Tokens committed, when known locally
    #[serde(with = "token_amount", default)]
    pub num_tokens: u128,
    /// Commit salt kept by the wallet, needed to reveal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl UserChallengeData {
    /// Reveal implies commit; collect implies reveal.
    pub fn validate(&self, challenge_id: &ChallengeId) -> CivilResult<()> {
        if self.did_user_reveal && !self.did_user_commit {
            return Err(CivilError::inconsistent(
                "user challenge data",
                challenge_id,
                "reveal without commit",
            ));
        }
        if self.did_user_collect && !self.did_user_reveal {
            return Err(CivilError::inconsistent(
                "user challenge data",
                challenge_id,
                "collect without reveal",
            ));
        }
        Ok(())
    }

    pub fn has_unclaimed_reward(&self) -> bool {
        self.did_user_reveal && self.is_voter_winner && !self.did_user_collect
    }

    pub fn has_unrevealed_commit(&self) -> bool {
        self.did_user_commit && !self.did_user_reveal
    }
}
