//! Record builders. Times are absolute unix seconds.

use civil_core::{listing_expiry, DomainRules};
use civil_types::{
    AppealChallengeData, AppealData, ChallengeData, ChallengeId, EthAddress, ListingData,
    ListingWrapper, ListingWrapperWithExpiry, PollData, UserChallengeData, WrappedChallengeData,
    DEFAULT_REQUEST_APPEAL_LEN,
};

use crate::constants::*;

pub fn address(value: &str) -> EthAddress {
    EthAddress::parse(value).unwrap_or_else(|e| panic!("bad fixture address {value}: {e}"))
}

pub fn poll(commit_end_date: u64, reveal_end_date: u64) -> PollData {
    PollData {
        commit_end_date,
        reveal_end_date,
        vote_quorum: 50,
        votes_for: 0,
        votes_against: 0,
    }
}

/// Unresolved challenge whose appeal-request window follows the reveal end
pub fn challenge(commit_end_date: u64, reveal_end_date: u64) -> ChallengeData {
    ChallengeData {
        challenger: address(CHALLENGER_ADDRESS),
        reward_pool: DEPOSIT / 2,
        stake: DEPOSIT,
        resolved: false,
        total_tokens: 0,
        poll: poll(commit_end_date, reveal_end_date),
        request_appeal_expiry: reveal_end_date + DEFAULT_REQUEST_APPEAL_LEN,
        appeal: None,
    }
}

pub fn resolved_challenge(commit_end_date: u64, reveal_end_date: u64) -> ChallengeData {
    ChallengeData {
        resolved: true,
        ..challenge(commit_end_date, reveal_end_date)
    }
}

/// Appeal that the council has not ruled on yet
pub fn pending_appeal(appeal_phase_expiry: u64) -> AppealData {
    AppealData {
        requester: address(APPEAL_REQUESTER_ADDRESS),
        appeal_fee_paid: DEPOSIT,
        appeal_phase_expiry,
        appeal_granted: false,
        appeal_open_to_challenge_expiry: 0,
        appeal_challenge_id: None,
        appeal_challenge: None,
    }
}

pub fn granted_appeal(appeal_phase_expiry: u64, open_to_challenge_expiry: u64) -> AppealData {
    AppealData {
        appeal_granted: true,
        appeal_open_to_challenge_expiry: open_to_challenge_expiry,
        ..pending_appeal(appeal_phase_expiry)
    }
}

pub fn appeal_challenge(commit_end_date: u64, reveal_end_date: u64) -> AppealChallengeData {
    AppealChallengeData {
        challenger: address(CHALLENGER_ADDRESS),
        reward_pool: 0,
        stake: DEPOSIT,
        resolved: false,
        total_tokens: 0,
        poll: poll(commit_end_date, reveal_end_date),
    }
}

/// Listing still in its application stage
pub fn applied_listing(app_expiry: u64) -> ListingData {
    ListingData {
        owner: address(OWNER_ADDRESS),
        is_whitelisted: false,
        app_expiry,
        unstaked_deposit: DEPOSIT,
        challenge_id: ChallengeId::none(),
        challenge: None,
    }
}

pub fn whitelisted_listing(app_expiry: u64) -> ListingData {
    ListingData {
        is_whitelisted: true,
        ..applied_listing(app_expiry)
    }
}

/// Listing removed from the registry: no application, no challenge
pub fn removed_listing() -> ListingData {
    applied_listing(0)
}

pub fn challenged_listing(
    base: ListingData,
    challenge_id: impl Into<ChallengeId>,
    challenge: ChallengeData,
) -> ListingData {
    ListingData {
        challenge_id: challenge_id.into(),
        challenge: Some(challenge),
        ..base
    }
}

/// Wrap a record the way the sync layer does, stamping its current expiry
pub fn wrap_listing(
    rules: &dyn DomainRules,
    listing_address: EthAddress,
    data: ListingData,
) -> ListingWrapperWithExpiry {
    let expiry = listing_expiry(rules, &data);
    ListingWrapperWithExpiry {
        listing: ListingWrapper {
            address: listing_address,
            data,
        },
        expiry,
    }
}

pub fn wrap_challenge(
    listing_address: EthAddress,
    challenge_id: impl Into<ChallengeId>,
    challenge: ChallengeData,
) -> WrappedChallengeData {
    WrappedChallengeData {
        listing_address,
        challenge_id: challenge_id.into(),
        challenge,
    }
}

/// A voter who committed but never revealed
pub fn committed_vote(num_tokens: u128) -> UserChallengeData {
    UserChallengeData {
        did_user_commit: true,
        num_tokens,
        ..Default::default()
    }
}

pub fn revealed_vote(num_tokens: u128, is_voter_winner: bool) -> UserChallengeData {
    UserChallengeData {
        did_user_reveal: true,
        is_voter_winner,
        ..committed_vote(num_tokens)
    }
}

pub fn collected_vote(num_tokens: u128) -> UserChallengeData {
    UserChallengeData {
        did_user_collect: true,
        ..revealed_vote(num_tokens, true)
    }
}
