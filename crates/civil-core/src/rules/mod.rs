//! # Registry Rules
//!
//! Pure predicates over on-chain shaped records that decide which stage of
//! the registry lifecycle a listing, challenge or appeal is in. Selectors
//! treat these as black-box contracts, so they are expressed as a trait that
//! can be swapped out (e.g. for a counting stub in tests).

mod civil;

pub use civil::CivilRules;

use civil_types::{AppealChallengeData, AppealData, ChallengeData, ListingData};

/// Lifecycle predicates for listings, challenges and appeals
pub trait DomainRules: Send + Sync {
    // ========================================================================
    // Challenge polls
    // ========================================================================

    fn is_challenge_in_commit_stage(&self, challenge: &ChallengeData) -> bool;

    fn is_challenge_in_reveal_stage(&self, challenge: &ChallengeData) -> bool;

    /// Voting and the appeal request window are over and no appeal was filed
    fn can_resolve_challenge(&self, challenge: &ChallengeData) -> bool;

    // ========================================================================
    // Appeals
    // ========================================================================

    fn is_appeal_awaiting_judgment(&self, appeal: &AppealData) -> bool;

    /// Appeal was granted and the window to challenge the grant is open
    fn is_awaiting_appeal_challenge(&self, appeal: &AppealData) -> bool;

    fn can_appeal_be_resolved(&self, appeal: &AppealData) -> bool;

    fn is_appeal_challenge_in_commit_stage(&self, challenge: &AppealChallengeData) -> bool;

    fn is_appeal_challenge_in_reveal_stage(&self, challenge: &AppealChallengeData) -> bool;

    fn can_appeal_challenge_be_resolved(&self, challenge: &AppealChallengeData) -> bool;

    // ========================================================================
    // Listings
    // ========================================================================

    fn is_in_application_phase(&self, listing: &ListingData) -> bool;

    fn can_be_whitelisted(&self, listing: &ListingData) -> bool;

    fn can_listing_be_challenged(&self, listing: &ListingData) -> bool;

    fn is_awaiting_appeal_request(&self, listing: &ListingData) -> bool;

    fn is_listing_awaiting_appeal_judgment(&self, listing: &ListingData) -> bool {
        appeal_of(listing).map_or(false, |appeal| self.is_appeal_awaiting_judgment(appeal))
    }

    fn is_listing_awaiting_appeal_challenge(&self, listing: &ListingData) -> bool {
        appeal_of(listing).map_or(false, |appeal| self.is_awaiting_appeal_challenge(appeal))
    }

    fn is_in_appeal_challenge_commit_phase(&self, listing: &ListingData) -> bool {
        appeal_challenge_of(listing)
            .map_or(false, |challenge| self.is_appeal_challenge_in_commit_stage(challenge))
    }

    fn is_in_appeal_challenge_reveal_phase(&self, listing: &ListingData) -> bool {
        appeal_challenge_of(listing)
            .map_or(false, |challenge| self.is_appeal_challenge_in_reveal_stage(challenge))
    }

    fn can_listing_appeal_challenge_be_resolved(&self, listing: &ListingData) -> bool {
        appeal_challenge_of(listing)
            .map_or(false, |challenge| self.can_appeal_challenge_be_resolved(challenge))
    }
}

/// Appeal attached to the listing's current challenge
pub fn appeal_of(listing: &ListingData) -> Option<&AppealData> {
    listing.challenge.as_ref().and_then(|c| c.appeal.as_ref())
}

/// Challenge raised against the listing's granted appeal
pub fn appeal_challenge_of(listing: &ListingData) -> Option<&AppealChallengeData> {
    appeal_of(listing).and_then(|a| a.appeal_challenge.as_ref())
}
