pub mod constants;
pub mod helpers;

use std::sync::Arc;

use civil_core::{CivilRules, Clock, DomainRules, FixedClock};
use civil_types::{
    ChallengeData, ChallengeId, EthAddress, ListingData, NewsroomData, NewsroomState,
    NewsroomWrapper, StateSnapshot, UserAccount, UserAccountState, UserChallengeData,
};

pub use constants::*;
pub use helpers::*;

/// Snapshot under construction plus the clock its rules read.
///
/// Listings are stamped with their expiry at insertion time; call
/// [`TestContext::resync_expiries`] after moving the clock to mimic the
/// sync layer refreshing them.
pub struct TestContext {
    pub clock: Arc<FixedClock>,
    pub rules: Arc<CivilRules<Arc<FixedClock>>>,
    pub state: StateSnapshot,
}

impl TestContext {
    pub fn new(now: u64) -> Self {
        let clock = Arc::new(FixedClock::new(now));
        let rules = Arc::new(CivilRules::new(clock.clone()));
        Self {
            clock,
            rules,
            state: StateSnapshot::default(),
        }
    }

    /// Context starting at [`BASE_TIME`]
    pub fn at_base_time() -> Self {
        Self::new(BASE_TIME)
    }

    /// The rules as the trait object selectors take
    pub fn dyn_rules(&self) -> Arc<dyn DomainRules> {
        self.rules.clone()
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn set_time(&self, now: u64) {
        self.clock.set(now);
    }

    pub fn advance(&self, seconds: u64) {
        self.clock.advance(seconds);
    }

    pub fn connect_user(&mut self, account: &str) -> EthAddress {
        let account = address(account);
        self.state = self.state.with_user(UserAccountState::connected(UserAccount {
            account: account.clone(),
            balance: DEPOSIT,
            voting_balance: DEPOSIT,
        }));
        account
    }

    pub fn disconnect_user(&mut self) {
        self.state = self.state.with_user(UserAccountState::default());
    }

    pub fn add_listing(&mut self, listing_address: &str, data: ListingData) -> EthAddress {
        let listing_address = address(listing_address);
        let wrapper = wrap_listing(self.rules.as_ref(), listing_address.clone(), data);
        self.state = self.state.with_listing(wrapper);
        listing_address
    }

    /// Insert a challenge record and attach it to its listing when present
    pub fn add_challenge(
        &mut self,
        listing_address: &str,
        challenge_id: impl Into<ChallengeId>,
        challenge: ChallengeData,
    ) -> ChallengeId {
        let listing_address = address(listing_address);
        let challenge_id = challenge_id.into();

        if let Some(wrapper) = self.state.listings.get(&listing_address).cloned() {
            let data = challenged_listing(
                wrapper.listing.data.clone(),
                challenge_id.clone(),
                challenge.clone(),
            );
            let wrapper = wrap_listing(self.rules.as_ref(), listing_address.clone(), data);
            self.state = self.state.with_listing(wrapper);
        }

        self.state = self.state.with_challenge(wrap_challenge(
            listing_address,
            challenge_id.clone(),
            challenge,
        ));
        challenge_id
    }

    pub fn add_vote(
        &mut self,
        challenge_id: impl Into<ChallengeId>,
        voter: &str,
        data: UserChallengeData,
    ) {
        self.state = self
            .state
            .with_user_challenge_data(challenge_id.into(), address(voter), data);
    }

    pub fn add_newsroom(&mut self, newsroom_address: &str, name: &str, owners: &[&str]) {
        self.state = self.state.with_newsroom(NewsroomState {
            wrapper: NewsroomWrapper {
                address: address(newsroom_address),
                data: NewsroomData {
                    name: name.to_string(),
                    owners: owners.iter().map(|owner| address(owner)).collect(),
                },
            },
        });
    }

    /// Re-stamp every listing's expiry against the current clock
    pub fn resync_expiries(&mut self) {
        let wrappers: Vec<_> = self.state.listings.values().cloned().collect();
        for wrapper in wrappers {
            let refreshed = wrap_listing(
                self.rules.as_ref(),
                wrapper.listing.address.clone(),
                wrapper.listing.data.clone(),
            );
            if refreshed.expiry != wrapper.expiry {
                self.state = self.state.with_listing(refreshed);
            }
        }
    }
}
