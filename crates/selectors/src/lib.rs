//! # Civil Selectors - Memoized View State
//!
//! Derives the view-state of the registry dapp from an immutable
//! [`StateSnapshot`](civil_types::StateSnapshot):
//!
//! - Plain accessors over snapshot slices
//! - Listing phase and eligibility flags
//! - Challenge stage flags and vote results
//! - Per-user reward, reveal and rescue sets
//!
//! Every `make_get_*` factory returns a fresh [`Selector`] with its own
//! single-entry cache. Give each view its own instance; sharing one across
//! views with different props makes the cache thrash.

pub mod accessors;
pub mod challenge;
pub mod listing;
pub mod memo;
pub mod props;
pub mod selector;
pub mod user;

// Re-export commonly used items
pub use accessors::*;
pub use challenge::{
    derive_challenge_state, make_get_challenge_results, make_get_challenge_state,
    make_get_listing_address_by_challenge_id, ChallengeResultsSelector, ChallengeState,
    ChallengeStateSelector, ListingAddressSelector,
};
pub use listing::{
    derive_listing_phase_state, make_get_latest_challenge_succeeded_challenge_id,
    make_get_latest_listing_event, make_get_latest_listing_removed_timestamp,
    make_get_latest_whitelisted_timestamp, make_get_listing, make_get_listing_current_expiry,
    make_get_listing_expiry,
    make_get_listing_phase_state, make_get_listing_phase_timing, LatestChallengeIdSelector,
    LatestListingEventSelector, LatestTimestampSelector, ListingExpirySelector,
    ListingPhaseState, ListingPhaseStateSelector, ListingPhaseTiming, ListingPhaseTimingSelector,
    ListingSelector,
};
pub use memo::{Memo, MemoKey};
pub use props::{ChallengeProps, ListingProps};
pub use selector::Selector;
pub use user::{
    make_get_challenge_user_data_map, make_get_is_user_newsroom_owner,
    make_get_user_challenge_data, make_get_user_challenges_with_rescue_tokens,
    make_get_user_challenges_with_unclaimed_rewards,
    make_get_user_challenges_with_unrevealed_votes, ChallengeIdSet, ChallengeUserDataMapSelector,
    NewsroomOwnerSelector, UserChallengeDataSelector, UserChallengeSetSelector,
};
