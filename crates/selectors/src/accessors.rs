//! # State Accessors
//!
//! Leaf lookups from a snapshot (plus props) to the slice a view needs.
//! A missing key in the props or in the map yields `None`, meaning "not
//! loaded yet"; accessors never fail. Returned slices are `Arc` clones so
//! memoized selectors can compare them by identity.

use std::sync::Arc;

use civil_types::{
    ChallengeMap, ChallengeUserDataMap, HistoryMap, ListingExtendedMetadata, ListingHistory,
    ListingMap, ListingWrapperWithExpiry, NewsroomState, ParameterSnapshot, StateSnapshot,
    UserAccountState, UserChallengeDataMap, WrappedChallengeData,
};

use crate::props::{ChallengeProps, ListingProps};

pub fn get_user(state: &StateSnapshot) -> Arc<UserAccountState> {
    state.user.clone()
}

pub fn get_listings(state: &StateSnapshot) -> Arc<ListingMap> {
    state.listings.clone()
}

pub fn get_challenges(state: &StateSnapshot) -> Arc<ChallengeMap> {
    state.challenges.clone()
}

pub fn get_challenge_user_data(state: &StateSnapshot) -> Arc<ChallengeUserDataMap> {
    state.challenge_user_data.clone()
}

pub fn get_histories(state: &StateSnapshot) -> Arc<HistoryMap> {
    state.histories.clone()
}

pub fn get_parameters(state: &StateSnapshot) -> Arc<ParameterSnapshot> {
    state.parameters.clone()
}

pub fn get_newsroom(state: &StateSnapshot, props: &ListingProps) -> Option<Arc<NewsroomState>> {
    let address = props.listing_address.as_ref()?;
    state.newsrooms.get(address).cloned()
}

pub fn get_listing_wrapper(
    state: &StateSnapshot,
    props: &ListingProps,
) -> Option<Arc<ListingWrapperWithExpiry>> {
    let address = props.listing_address.as_ref()?;
    state.listings.get(address).cloned()
}

pub fn get_challenge(
    state: &StateSnapshot,
    props: &ChallengeProps,
) -> Option<Arc<WrappedChallengeData>> {
    let challenge_id = props.challenge_id.as_ref()?;
    state.challenges.get(challenge_id).cloned()
}

/// Voter map of one challenge
pub fn get_challenge_user_data_map(
    state: &StateSnapshot,
    props: &ChallengeProps,
) -> Option<Arc<UserChallengeDataMap>> {
    let challenge_id = props.challenge_id.as_ref()?;
    state.challenge_user_data.get(challenge_id).cloned()
}

pub fn get_listing_history(
    state: &StateSnapshot,
    props: &ListingProps,
) -> Option<Arc<ListingHistory>> {
    let address = props.listing_address.as_ref()?;
    state.histories.get(address).cloned()
}

pub fn get_listing_extended_metadata(
    state: &StateSnapshot,
    props: &ListingProps,
) -> Option<Arc<ListingExtendedMetadata>> {
    let address = props.listing_address.as_ref()?;
    state.listings_extended_metadata.get(address).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use civil_types::{ChallengeId, EthAddress, ListingExtendedMetadata};

    fn addr(last: u8) -> EthAddress {
        EthAddress::parse(&format!("0x{:040x}", last)).unwrap()
    }

    #[test]
    fn test_missing_props_yield_none() {
        let state = StateSnapshot::default()
            .with_extended_metadata(addr(1), ListingExtendedMetadata::default());
        let props = ListingProps::default();

        assert!(get_listing_wrapper(&state, &props).is_none());
        assert!(get_newsroom(&state, &props).is_none());
        assert!(get_listing_history(&state, &props).is_none());
        assert!(get_listing_extended_metadata(&state, &props).is_none());
        assert!(get_challenge(&state, &ChallengeProps::default()).is_none());
        assert!(get_challenge_user_data_map(&state, &ChallengeProps::default()).is_none());
    }

    #[test]
    fn test_lookup_returns_shared_slice() {
        let state = StateSnapshot::default()
            .with_extended_metadata(addr(1), ListingExtendedMetadata {
                latest_challenge_id: Some(ChallengeId::from(2u64)),
                ..Default::default()
            });

        let first = get_listing_extended_metadata(&state, &ListingProps::new(addr(1))).unwrap();
        let second = get_listing_extended_metadata(&state, &ListingProps::new(addr(1))).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(get_listing_extended_metadata(&state, &ListingProps::new(addr(2))).is_none());
    }
}
