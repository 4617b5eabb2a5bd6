use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use civil_core::DomainRules;
use civil_selectors::*;
use civil_types::{EthAddress, StateSnapshot, UserAccount, UserAccountState};

use crate::client::CivilClient;
use crate::config::{InspectorConfig, WatchedListing};
use crate::error::InspectorResult;
use crate::report::{format_timestamp, ChallengeReport, InspectionReport, ListingReport, UserReport};

/// Selector instances dedicated to one listing view
pub struct ListingSelectors {
    name: String,
    props: ListingProps,
    listing: ListingSelector,
    recorded_expiry: ListingExpirySelector,
    expiry: ListingExpirySelector,
    phase_state: ListingPhaseStateSelector,
    phase_timing: ListingPhaseTimingSelector,
    latest_event: LatestListingEventSelector,
    latest_challenge_succeeded: LatestChallengeIdSelector,
    whitelisted_at: LatestTimestampSelector,
    removed_at: LatestTimestampSelector,
    user_is_owner: NewsroomOwnerSelector,
    challenge_state: ChallengeStateSelector,
    challenge_results: ChallengeResultsSelector,
    user_vote: UserChallengeDataSelector,
}

impl ListingSelectors {
    pub fn new(watch: &WatchedListing, rules: Arc<dyn DomainRules>) -> Self {
        Self {
            name: watch.name.clone(),
            props: ListingProps::new(watch.address.clone()),
            listing: make_get_listing(),
            recorded_expiry: make_get_listing_expiry(),
            expiry: make_get_listing_current_expiry(rules.clone()),
            phase_state: make_get_listing_phase_state(rules.clone()),
            phase_timing: make_get_listing_phase_timing(rules.clone()),
            latest_event: make_get_latest_listing_event(),
            latest_challenge_succeeded: make_get_latest_challenge_succeeded_challenge_id(),
            whitelisted_at: make_get_latest_whitelisted_timestamp(),
            removed_at: make_get_latest_listing_removed_timestamp(),
            user_is_owner: make_get_is_user_newsroom_owner(),
            challenge_state: make_get_challenge_state(rules),
            challenge_results: make_get_challenge_results(),
            user_vote: make_get_user_challenge_data(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total result recomputations across the bundle
    pub fn recomputations(&self) -> usize {
        self.listing.recomputations()
            + self.recorded_expiry.recomputations()
            + self.expiry.recomputations()
            + self.phase_state.recomputations()
            + self.phase_timing.recomputations()
            + self.latest_event.recomputations()
            + self.latest_challenge_succeeded.recomputations()
            + self.whitelisted_at.recomputations()
            + self.removed_at.recomputations()
            + self.user_is_owner.recomputations()
            + self.challenge_state.recomputations()
            + self.challenge_results.recomputations()
            + self.user_vote.recomputations()
    }

    /// Drop cached results that were derived from the evaluation time
    pub fn invalidate_time_dependent(&self) {
        self.expiry.invalidate();
        self.phase_state.invalidate();
        self.phase_timing.invalidate();
        self.challenge_state.invalidate();
    }

    pub fn report(&self, state: &StateSnapshot, now: u64) -> ListingReport {
        let address = self
            .props
            .listing_address
            .clone()
            .unwrap_or_else(EthAddress::zero);
        let listing = self.listing.select(state, &self.props);

        let timing = self.phase_timing.select(state, &self.props);
        let expiry = self.expiry.select(state, &self.props);

        let challenge = listing
            .as_ref()
            .map(|l| l.data.challenge_id.clone())
            .filter(|id| !id.is_none())
            .map(|challenge_id| {
                let props = ChallengeProps::new(challenge_id.clone());
                let results = self.challenge_results.select(state, &props);
                let passed_quorum = results
                    .zip(get_challenge(state, &props))
                    .map(|(results, wrapped)| results.passed_quorum(wrapped.challenge.poll.vote_quorum));
                ChallengeReport {
                    challenge_id,
                    state: self.challenge_state.select(state, &props),
                    results,
                    passed_quorum,
                    user_vote: self.user_vote.select(state, &props),
                }
            });

        ListingReport {
            name: self.name.clone(),
            address,
            loaded: listing.is_some(),
            phase: timing.map(|t| t.phase),
            phase_name: timing.map(|t| t.phase.display_name()),
            expiry,
            recorded_expiry: self.recorded_expiry.select(state, &self.props),
            expires_at: expiry.and_then(format_timestamp),
            seconds_remaining: expiry.map(|e| e.saturating_sub(now)),
            flags: self.phase_state.select(state, &self.props),
            challenge,
            latest_event: self.latest_event.select(state, &self.props),
            latest_challenge_succeeded: self.latest_challenge_succeeded.select(state, &self.props),
            whitelisted_at: self.whitelisted_at.select(state, &self.props),
            removed_at: self.removed_at.select(state, &self.props),
            user_is_owner: self.user_is_owner.select(state, &self.props),
        }
    }
}

/// Selector instances for the inspected account
pub struct UserSelectors {
    unclaimed_rewards: UserChallengeSetSelector,
    unrevealed_votes: UserChallengeSetSelector,
    rescue_tokens: UserChallengeSetSelector,
}

impl UserSelectors {
    pub fn new(rules: Arc<dyn DomainRules>) -> Self {
        Self {
            unclaimed_rewards: make_get_user_challenges_with_unclaimed_rewards(),
            unrevealed_votes: make_get_user_challenges_with_unrevealed_votes(rules),
            rescue_tokens: make_get_user_challenges_with_rescue_tokens(),
        }
    }

    pub fn invalidate_time_dependent(&self) {
        self.unrevealed_votes.invalidate();
    }

    pub fn recomputations(&self) -> usize {
        self.unclaimed_rewards.recomputations()
            + self.unrevealed_votes.recomputations()
            + self.rescue_tokens.recomputations()
    }

    pub fn report(&self, state: &StateSnapshot) -> UserReport {
        UserReport {
            account: state.user.address().cloned(),
            unclaimed_rewards: self.unclaimed_rewards.select(state, &()),
            unrevealed_votes: self.unrevealed_votes.select(state, &()),
            rescue_tokens: self.rescue_tokens.select(state, &()),
        }
    }
}

/// Periodic inspector over a registry client
pub struct Inspector {
    client: CivilClient,
    listings: Vec<ListingSelectors>,
    user: UserSelectors,
    /// Replaces the snapshot's user slice; one allocation keeps it stable
    user_override: Option<Arc<UserAccountState>>,
    previous: Option<InspectionReport>,
    /// Clock reading of the previous pass
    evaluated_at: Option<u64>,
}

impl Inspector {
    pub fn new(client: CivilClient, config: &InspectorConfig) -> Self {
        let rules = client.rules();
        let listings = config
            .enabled_listings()
            .into_iter()
            .map(|watch| ListingSelectors::new(watch, rules.clone()))
            .collect();

        let user_override = config.user_address.clone().map(|account| {
            Arc::new(UserAccountState::connected(UserAccount {
                account,
                balance: 0,
                voting_balance: 0,
            }))
        });

        Self {
            client,
            listings,
            user: UserSelectors::new(rules),
            user_override,
            previous: None,
            evaluated_at: None,
        }
    }

    pub fn listing_selectors(&self) -> &[ListingSelectors] {
        &self.listings
    }

    pub fn user_selectors(&self) -> &UserSelectors {
        &self.user
    }

    /// Re-derive every report from the current snapshot and log what changed
    pub fn inspect_all(&mut self) -> InspectorResult<InspectionReport> {
        let snapshot = self.client.snapshot()?;
        let mut state = StateSnapshot::clone(&snapshot);
        if let Some(user) = &self.user_override {
            state.user = user.clone();
        }

        // Memo keys exclude the clock; drop time-derived results once it moves
        let now = self.client.now();
        if self.evaluated_at.is_some_and(|previous| previous != now) {
            for listing in &self.listings {
                listing.invalidate_time_dependent();
            }
            self.user.invalidate_time_dependent();
        }
        self.evaluated_at = Some(now);

        let report = InspectionReport {
            evaluated_at: now,
            listings: self.listings.iter().map(|l| l.report(&state, now)).collect(),
            user: self.user.report(&state),
        };

        let changes = log_changes(self.previous.as_ref(), &report);
        debug!(
            listings = report.listings.len(),
            changes,
            "inspection pass complete"
        );

        self.previous = Some(report.clone());
        Ok(report)
    }

    pub fn shutdown(self) {
        info!(listings = self.listings.len(), "inspector shutting down");
        self.client.shutdown();
    }
}

/// Log phase transitions and eligibility changes; returns how many were seen
fn log_changes(previous: Option<&InspectionReport>, current: &InspectionReport) -> usize {
    let before: HashMap<&EthAddress, &ListingReport> = previous
        .map(|p| p.listings.iter().map(|l| (&l.address, l)).collect())
        .unwrap_or_default();

    let mut changes = 0;
    for listing in &current.listings {
        let prior = before.get(&listing.address);
        let stale = listing.loaded && listing.recorded_expiry != listing.expiry;
        let was_stale = prior.is_some_and(|p| p.loaded && p.recorded_expiry != p.expiry);
        if stale && !was_stale {
            warn!(
                listing = %listing.name,
                recorded = ?listing.recorded_expiry,
                derived = ?listing.expiry,
                "snapshot expiry disagrees with the listing's phase"
            );
        }

        if prior.map(|p| p.phase) == Some(listing.phase) {
            continue;
        }
        changes += 1;

        if !listing.loaded {
            warn!(listing = %listing.name, address = %listing.address, "listing not in snapshot");
            continue;
        }

        info!(
            listing = %listing.name,
            address = %listing.address,
            from = prior.and_then(|p| p.phase_name).unwrap_or("none"),
            to = listing.phase_name.unwrap_or("none"),
            expires_at = listing.expires_at.as_deref().unwrap_or("-"),
            "listing phase changed"
        );
    }

    let prior_user = previous.map(|p| &p.user);
    let sets = [
        ("unclaimed_rewards", &current.user.unclaimed_rewards, prior_user.map(|u| &u.unclaimed_rewards)),
        ("unrevealed_votes", &current.user.unrevealed_votes, prior_user.map(|u| &u.unrevealed_votes)),
        ("rescue_tokens", &current.user.rescue_tokens, prior_user.map(|u| &u.rescue_tokens)),
    ];
    for (set, now, before) in sets {
        if before == Some(now) {
            continue;
        }
        changes += 1;
        match now {
            Some(ids) => {
                let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                info!(set, challenges = ?ids, "eligibility changed");
            }
            None => debug!(set, "no account connected"),
        }
    }

    changes
}
