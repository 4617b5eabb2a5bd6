//! # Listing Selectors
//!
//! Phase and eligibility view-state of a single listing. Flags that only
//! make sense while the listing carries a challenge are `None` when it does
//! not; callers must not read that as `false`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use civil_core::{listing_expiry, phase_timing, DomainRules, ListingPhase, PhaseTiming};
use civil_types::{
    ChallengeId, ListingData, ListingExtendedMetadata, ListingHistory, ListingWrapper,
    ListingWrapperWithExpiry, ParameterSnapshot, StateSnapshot, TimestampedEvent,
};

use crate::accessors::{
    get_listing_extended_metadata, get_listing_history, get_listing_wrapper, get_parameters,
};
use crate::props::ListingProps;
use crate::selector::Selector;

/// Phase flags of one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPhaseState {
    pub is_in_application: bool,
    pub can_be_challenged: bool,
    pub can_be_whitelisted: bool,
    pub can_resolve_challenge: Option<bool>,
    pub in_challenge_commit_vote_phase: Option<bool>,
    pub in_challenge_reveal_phase: Option<bool>,
    pub is_awaiting_appeal_request: bool,
    pub is_whitelisted: bool,
    pub is_under_challenge: Option<bool>,
    /// Complement of every live state, not an on-chain fact
    pub is_rejected: bool,
    pub is_awaiting_appeal_judgment: bool,
    pub is_awaiting_appeal_challenge: bool,
    pub is_in_appeal_challenge_commit_phase: bool,
    pub is_in_appeal_challenge_reveal_phase: bool,
    pub can_listing_appeal_challenge_be_resolved: bool,
}

impl ListingPhaseState {
    /// Collapse the flags into the one phase a listing page is drawn for.
    ///
    /// Challenge sub-phases win over the listing's base status; a listing
    /// that is neither live nor whitelisted reads as rejected.
    pub fn main_phase(&self) -> ListingPhase {
        if self.is_under_challenge == Some(true) {
            if self.in_challenge_commit_vote_phase == Some(true) {
                return ListingPhase::ChallengeCommitVote;
            }
            if self.in_challenge_reveal_phase == Some(true) {
                return ListingPhase::ChallengeRevealVote;
            }
            if self.is_awaiting_appeal_request {
                return ListingPhase::AwaitingAppealRequest;
            }
            if self.is_awaiting_appeal_judgment {
                return ListingPhase::AwaitingAppealJudgment;
            }
            if self.is_awaiting_appeal_challenge {
                return ListingPhase::AwaitingAppealChallenge;
            }
            if self.is_in_appeal_challenge_commit_phase {
                return ListingPhase::AppealChallengeCommitVote;
            }
            if self.is_in_appeal_challenge_reveal_phase {
                return ListingPhase::AppealChallengeRevealVote;
            }
            return ListingPhase::ReadyToResolve;
        }

        if self.is_in_application {
            ListingPhase::Application
        } else if self.can_be_whitelisted {
            ListingPhase::ReadyToWhitelist
        } else if self.is_whitelisted {
            ListingPhase::Whitelisted
        } else {
            ListingPhase::Rejected
        }
    }
}

/// Compute the phase flags of a listing record
pub fn derive_listing_phase_state(rules: &dyn DomainRules, listing: &ListingData) -> ListingPhaseState {
    let challenge = listing.challenge.as_ref();

    let is_in_application = rules.is_in_application_phase(listing);
    let can_be_whitelisted = rules.can_be_whitelisted(listing);
    let is_whitelisted = listing.is_whitelisted;

    ListingPhaseState {
        is_in_application,
        can_be_challenged: rules.can_listing_be_challenged(listing),
        can_be_whitelisted,
        can_resolve_challenge: challenge.map(|c| rules.can_resolve_challenge(c)),
        in_challenge_commit_vote_phase: challenge.map(|c| rules.is_challenge_in_commit_stage(c)),
        in_challenge_reveal_phase: challenge.map(|c| rules.is_challenge_in_reveal_stage(c)),
        is_awaiting_appeal_request: rules.is_awaiting_appeal_request(listing),
        is_whitelisted,
        is_under_challenge: challenge.map(|c| !c.resolved),
        is_rejected: !is_whitelisted && !is_in_application && !can_be_whitelisted && challenge.is_none(),
        is_awaiting_appeal_judgment: rules.is_listing_awaiting_appeal_judgment(listing),
        is_awaiting_appeal_challenge: rules.is_listing_awaiting_appeal_challenge(listing),
        is_in_appeal_challenge_commit_phase: rules.is_in_appeal_challenge_commit_phase(listing),
        is_in_appeal_challenge_reveal_phase: rules.is_in_appeal_challenge_reveal_phase(listing),
        can_listing_appeal_challenge_be_resolved: rules.can_listing_appeal_challenge_be_resolved(listing),
    }
}

/// Main phase plus countdown bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPhaseTiming {
    pub phase: ListingPhase,
    pub timing: Option<PhaseTiming>,
}

// ============================================================================
// Selector types
// ============================================================================

type WrapperKey = Option<Arc<ListingWrapperWithExpiry>>;
type MetadataKey = Option<Arc<ListingExtendedMetadata>>;

pub type ListingSelector = Selector<ListingProps, WrapperKey, Option<ListingWrapper>>;
pub type ListingExpirySelector = Selector<ListingProps, WrapperKey, Option<u64>>;
pub type ListingPhaseStateSelector = Selector<ListingProps, WrapperKey, Option<ListingPhaseState>>;
pub type ListingPhaseTimingSelector =
    Selector<ListingProps, (WrapperKey, Arc<ParameterSnapshot>), Option<ListingPhaseTiming>>;
pub type LatestChallengeIdSelector = Selector<ListingProps, MetadataKey, Option<ChallengeId>>;
pub type LatestTimestampSelector = Selector<ListingProps, MetadataKey, Option<u64>>;
pub type LatestListingEventSelector =
    Selector<ListingProps, Option<Arc<ListingHistory>>, Option<TimestampedEvent>>;

// ============================================================================
// Selector factories
// ============================================================================

pub fn make_get_listing() -> ListingSelector {
    Selector::new("listing", get_listing_wrapper, |wrapper: &WrapperKey| {
        wrapper.as_ref().map(|w| w.listing.clone())
    })
}

pub fn make_get_listing_expiry() -> ListingExpirySelector {
    Selector::new("listing_expiry", get_listing_wrapper, |wrapper: &WrapperKey| {
        wrapper.as_ref().and_then(|w| w.expiry)
    })
}

/// Expiry recomputed from the rules at the current time, independent of
/// the value stamped into the snapshot
pub fn make_get_listing_current_expiry(rules: Arc<dyn DomainRules>) -> ListingExpirySelector {
    Selector::new("listing_current_expiry", get_listing_wrapper, move |wrapper: &WrapperKey| {
        wrapper
            .as_ref()
            .and_then(|w| listing_expiry(rules.as_ref(), &w.listing.data))
    })
}

pub fn make_get_listing_phase_state(rules: Arc<dyn DomainRules>) -> ListingPhaseStateSelector {
    Selector::new("listing_phase_state", get_listing_wrapper, move |wrapper: &WrapperKey| {
        let wrapper = wrapper.as_ref()?;
        Some(derive_listing_phase_state(rules.as_ref(), &wrapper.listing.data))
    })
}

pub fn make_get_listing_phase_timing(rules: Arc<dyn DomainRules>) -> ListingPhaseTimingSelector {
    Selector::new(
        "listing_phase_timing",
        |state: &StateSnapshot, props: &ListingProps| {
            (get_listing_wrapper(state, props), get_parameters(state))
        },
        move |(wrapper, parameters): &(WrapperKey, Arc<ParameterSnapshot>)| {
            let listing = &wrapper.as_ref()?.listing.data;
            let phase = derive_listing_phase_state(rules.as_ref(), listing).main_phase();
            Some(ListingPhaseTiming {
                phase,
                timing: phase_timing(phase, listing, parameters),
            })
        },
    )
}

pub fn make_get_latest_challenge_succeeded_challenge_id() -> LatestChallengeIdSelector {
    Selector::new(
        "latest_challenge_succeeded_challenge_id",
        get_listing_extended_metadata,
        |metadata: &MetadataKey| {
            metadata
                .as_ref()?
                .latest_challenge_id
                .clone()
                .filter(|id| !id.is_none())
        },
    )
}

pub fn make_get_latest_listing_removed_timestamp() -> LatestTimestampSelector {
    Selector::new(
        "latest_listing_removed_timestamp",
        get_listing_extended_metadata,
        |metadata: &MetadataKey| {
            metadata
                .as_ref()?
                .listing_removed_timestamp
                .filter(|ts| *ts != 0)
        },
    )
}

pub fn make_get_latest_whitelisted_timestamp() -> LatestTimestampSelector {
    Selector::new(
        "latest_whitelisted_timestamp",
        get_listing_extended_metadata,
        |metadata: &MetadataKey| metadata.as_ref()?.whitelisted_timestamp.filter(|ts| *ts != 0),
    )
}

/// Most recent entry of the listing's event history
pub fn make_get_latest_listing_event() -> LatestListingEventSelector {
    Selector::new(
        "latest_listing_event",
        get_listing_history,
        |history: &Option<Arc<ListingHistory>>| {
            history
                .as_ref()?
                .iter()
                .max_by_key(|event| (event.timestamp, event.block_number))
                .cloned()
        },
    )
}
