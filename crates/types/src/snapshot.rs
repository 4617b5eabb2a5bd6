//! # State Snapshot
//!
//! The full registry state at one point in time. Every sub-map sits behind an
//! `Arc` and every entry is itself an `Arc`, so producing the next snapshot
//! copies only the path to the entries that changed. Consumers rely on
//! pointer identity of these `Arc`s to detect change cheaply.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::address::EthAddress;
use crate::challenge::WrappedChallengeData;
use crate::history::TimestampedEvent;
use crate::ids::ChallengeId;
use crate::listing::{ListingExtendedMetadata, ListingWrapperWithExpiry};
use crate::newsroom::NewsroomState;
use crate::parameters::ParameterSnapshot;
use crate::user::{UserAccountState, UserChallengeData};
use crate::CivilResult;

pub type ListingMap = HashMap<EthAddress, Arc<ListingWrapperWithExpiry>>;
pub type ChallengeMap = HashMap<ChallengeId, Arc<WrappedChallengeData>>;
/// One challenge's user data, keyed by voter
pub type UserChallengeDataMap = HashMap<EthAddress, UserChallengeData>;
pub type ChallengeUserDataMap = HashMap<ChallengeId, Arc<UserChallengeDataMap>>;
pub type ListingHistory = Vec<TimestampedEvent>;
pub type HistoryMap = HashMap<EthAddress, Arc<ListingHistory>>;
pub type ExtendedMetadataMap = HashMap<EthAddress, Arc<ListingExtendedMetadata>>;
pub type NewsroomMap = HashMap<EthAddress, Arc<NewsroomState>>;

/// Immutable view of registry state handed to accessors and selectors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default)]
    pub user: Arc<UserAccountState>,
    #[serde(default)]
    pub listings: Arc<ListingMap>,
    #[serde(default)]
    pub challenges: Arc<ChallengeMap>,
    #[serde(default)]
    pub challenge_user_data: Arc<ChallengeUserDataMap>,
    #[serde(default)]
    pub histories: Arc<HistoryMap>,
    #[serde(default)]
    pub listings_extended_metadata: Arc<ExtendedMetadataMap>,
    #[serde(default)]
    pub newsrooms: Arc<NewsroomMap>,
    #[serde(default)]
    pub parameters: Arc<ParameterSnapshot>,
}

impl StateSnapshot {
    /// Decode a snapshot dump and check record invariants
    pub fn from_json(json: &str) -> CivilResult<Self> {
        let snapshot: StateSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check per-record invariants of the data model
    pub fn validate(&self) -> CivilResult<()> {
        for wrapper in self.listings.values() {
            wrapper.listing.data.validate()?;
        }
        for (challenge_id, users) in self.challenge_user_data.iter() {
            for data in users.values() {
                data.validate(challenge_id)?;
            }
        }
        self.parameters.validate()?;
        Ok(())
    }

    // ========================================================================
    // Structural-sharing updates
    // ========================================================================

    pub fn with_user(&self, user: UserAccountState) -> Self {
        let mut next = self.clone();
        next.user = Arc::new(user);
        next
    }

    pub fn with_listing(&self, wrapper: ListingWrapperWithExpiry) -> Self {
        let mut next = self.clone();
        let address = wrapper.listing.address.clone();
        Arc::make_mut(&mut next.listings).insert(address, Arc::new(wrapper));
        next
    }

    pub fn with_challenge(&self, challenge: WrappedChallengeData) -> Self {
        let mut next = self.clone();
        let id = challenge.challenge_id.clone();
        Arc::make_mut(&mut next.challenges).insert(id, Arc::new(challenge));
        next
    }

    pub fn with_user_challenge_data(
        &self,
        challenge_id: ChallengeId,
        user: EthAddress,
        data: UserChallengeData,
    ) -> Self {
        let mut next = self.clone();
        let per_challenge = Arc::make_mut(&mut next.challenge_user_data)
            .entry(challenge_id)
            .or_default();
        Arc::make_mut(per_challenge).insert(user, data);
        next
    }

    pub fn with_history_event(&self, listing: EthAddress, event: TimestampedEvent) -> Self {
        let mut next = self.clone();
        let history = Arc::make_mut(&mut next.histories).entry(listing).or_default();
        Arc::make_mut(history).push(event);
        next
    }

    pub fn with_extended_metadata(
        &self,
        listing: EthAddress,
        metadata: ListingExtendedMetadata,
    ) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.listings_extended_metadata).insert(listing, Arc::new(metadata));
        next
    }

    pub fn with_newsroom(&self, newsroom: NewsroomState) -> Self {
        let mut next = self.clone();
        let address = newsroom.wrapper.address.clone();
        Arc::make_mut(&mut next.newsrooms).insert(address, Arc::new(newsroom));
        next
    }

    pub fn with_parameters(&self, parameters: ParameterSnapshot) -> Self {
        let mut next = self.clone();
        next.parameters = Arc::new(parameters);
        next
    }

    // ========================================================================
    // Reloading
    // ========================================================================

    /// Re-point unchanged parts of a freshly decoded snapshot at `previous`.
    ///
    /// A decoded dump allocates every `Arc` anew. Reconciling against the
    /// snapshot it replaces restores pointer identity for every slice and
    /// entry whose content is equal, so only views over changed records
    /// recompute.
    pub fn reconcile(self, previous: &StateSnapshot) -> StateSnapshot {
        StateSnapshot {
            user: reuse_if_equal(&previous.user, self.user),
            listings: reuse_entries(&previous.listings, self.listings),
            challenges: reuse_entries(&previous.challenges, self.challenges),
            challenge_user_data: reuse_entries(&previous.challenge_user_data, self.challenge_user_data),
            histories: reuse_entries(&previous.histories, self.histories),
            listings_extended_metadata: reuse_entries(
                &previous.listings_extended_metadata,
                self.listings_extended_metadata,
            ),
            newsrooms: reuse_entries(&previous.newsrooms, self.newsrooms),
            parameters: reuse_if_equal(&previous.parameters, self.parameters),
        }
    }
}

fn reuse_if_equal<T: PartialEq>(previous: &Arc<T>, next: Arc<T>) -> Arc<T> {
    if **previous == *next {
        previous.clone()
    } else {
        next
    }
}

fn reuse_entries<K, V>(
    previous: &Arc<HashMap<K, Arc<V>>>,
    mut next: Arc<HashMap<K, Arc<V>>>,
) -> Arc<HashMap<K, Arc<V>>>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    if **previous == *next {
        return previous.clone();
    }
    for (key, value) in Arc::make_mut(&mut next).iter_mut() {
        if let Some(old) = previous.get(key) {
            if **old == **value {
                *value = old.clone();
            }
        }
    }
    next
}
