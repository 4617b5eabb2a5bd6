//! Challenge-scoped selectors

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use civil_core::{ChallengeResults, DomainRules};
use civil_types::{ChallengeData, EthAddress, WrappedChallengeData};

use crate::accessors::get_challenge;
use crate::props::ChallengeProps;
use crate::selector::Selector;

/// Stage flags of one challenge. Appeal flags are `None` until an appeal
/// has been requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeState {
    pub is_resolved: bool,
    pub in_commit_phase: bool,
    pub in_reveal_phase: bool,
    pub can_resolve_challenge: bool,
    pub is_awaiting_appeal_judgment: Option<bool>,
    pub is_awaiting_appeal_challenge: Option<bool>,
    pub can_appeal_be_resolved: Option<bool>,
}

pub fn derive_challenge_state(rules: &dyn DomainRules, challenge: &ChallengeData) -> ChallengeState {
    let appeal = challenge.appeal.as_ref();

    ChallengeState {
        is_resolved: challenge.resolved,
        in_commit_phase: rules.is_challenge_in_commit_stage(challenge),
        in_reveal_phase: rules.is_challenge_in_reveal_stage(challenge),
        can_resolve_challenge: rules.can_resolve_challenge(challenge),
        is_awaiting_appeal_judgment: appeal.map(|a| rules.is_appeal_awaiting_judgment(a)),
        is_awaiting_appeal_challenge: appeal.map(|a| rules.is_awaiting_appeal_challenge(a)),
        can_appeal_be_resolved: appeal.map(|a| rules.can_appeal_be_resolved(a)),
    }
}

type ChallengeKey = Option<Arc<WrappedChallengeData>>;

pub type ChallengeStateSelector = Selector<ChallengeProps, ChallengeKey, Option<ChallengeState>>;
pub type ListingAddressSelector = Selector<ChallengeProps, ChallengeKey, Option<EthAddress>>;
pub type ChallengeResultsSelector = Selector<ChallengeProps, ChallengeKey, Option<ChallengeResults>>;

pub fn make_get_challenge_state(rules: Arc<dyn DomainRules>) -> ChallengeStateSelector {
    Selector::new("challenge_state", get_challenge, move |wrapped: &ChallengeKey| {
        let wrapped = wrapped.as_ref()?;
        Some(derive_challenge_state(rules.as_ref(), &wrapped.challenge))
    })
}

/// Listing a challenge was raised against
pub fn make_get_listing_address_by_challenge_id() -> ListingAddressSelector {
    Selector::new("listing_address_by_challenge_id", get_challenge, |wrapped: &ChallengeKey| {
        wrapped.as_ref().map(|w| w.listing_address.clone())
    })
}

/// Tallies of the challenge poll
pub fn make_get_challenge_results() -> ChallengeResultsSelector {
    Selector::new("challenge_results", get_challenge, |wrapped: &ChallengeKey| {
        wrapped
            .as_ref()
            .map(|w| ChallengeResults::from_poll(&w.challenge.poll))
    })
}
