//! Registry lifecycle as enforced by the Civil TCR contracts

use civil_types::{AppealChallengeData, AppealData, ChallengeData, ListingData, PollData};

use super::DomainRules;
use crate::clock::{is_deadline_passed, Clock};

/// Deadline-driven implementation of [`DomainRules`]
#[derive(Debug, Clone, Default)]
pub struct CivilRules<C> {
    clock: C,
}

impl<C: Clock> CivilRules<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn passed(&self, deadline: u64) -> bool {
        is_deadline_passed(deadline, self.clock.now())
    }

    fn in_commit_stage(&self, poll: &PollData) -> bool {
        !self.passed(poll.commit_end_date)
    }

    fn in_reveal_stage(&self, poll: &PollData) -> bool {
        self.passed(poll.commit_end_date) && !self.passed(poll.reveal_end_date)
    }

    fn is_voting_over(&self, poll: &PollData) -> bool {
        self.passed(poll.reveal_end_date)
    }
}

fn has_appeal_challenge(appeal: &AppealData) -> bool {
    appeal.appeal_challenge.is_some()
        || appeal
            .appeal_challenge_id
            .as_ref()
            .map_or(false, |id| !id.is_none())
}

impl<C: Clock> DomainRules for CivilRules<C> {
    fn is_challenge_in_commit_stage(&self, challenge: &ChallengeData) -> bool {
        !challenge.resolved && self.in_commit_stage(&challenge.poll)
    }

    fn is_challenge_in_reveal_stage(&self, challenge: &ChallengeData) -> bool {
        !challenge.resolved && self.in_reveal_stage(&challenge.poll)
    }

    fn can_resolve_challenge(&self, challenge: &ChallengeData) -> bool {
        !challenge.resolved
            && self.is_voting_over(&challenge.poll)
            && self.passed(challenge.request_appeal_expiry)
            && challenge.appeal.is_none()
    }

    fn is_appeal_awaiting_judgment(&self, appeal: &AppealData) -> bool {
        !appeal.appeal_granted && !self.passed(appeal.appeal_phase_expiry)
    }

    fn is_awaiting_appeal_challenge(&self, appeal: &AppealData) -> bool {
        appeal.appeal_granted
            && appeal.appeal_open_to_challenge_expiry != 0
            && !self.passed(appeal.appeal_open_to_challenge_expiry)
            && !has_appeal_challenge(appeal)
    }

    fn can_appeal_be_resolved(&self, appeal: &AppealData) -> bool {
        if appeal.appeal_granted {
            // A challenged grant is settled by resolving the appeal challenge instead
            appeal.appeal_open_to_challenge_expiry != 0
                && self.passed(appeal.appeal_open_to_challenge_expiry)
                && !has_appeal_challenge(appeal)
        } else {
            self.passed(appeal.appeal_phase_expiry)
        }
    }

    fn is_appeal_challenge_in_commit_stage(&self, challenge: &AppealChallengeData) -> bool {
        !challenge.resolved && self.in_commit_stage(&challenge.poll)
    }

    fn is_appeal_challenge_in_reveal_stage(&self, challenge: &AppealChallengeData) -> bool {
        !challenge.resolved && self.in_reveal_stage(&challenge.poll)
    }

    fn can_appeal_challenge_be_resolved(&self, challenge: &AppealChallengeData) -> bool {
        !challenge.resolved && self.is_voting_over(&challenge.poll)
    }

    fn is_in_application_phase(&self, listing: &ListingData) -> bool {
        if listing.is_whitelisted || listing.app_expiry == 0 {
            return false;
        }
        !self.passed(listing.app_expiry)
    }

    fn can_be_whitelisted(&self, listing: &ListingData) -> bool {
        !listing.is_whitelisted
            && listing.app_expiry != 0
            && self.passed(listing.app_expiry)
            && listing.challenge_id.is_none()
    }

    fn can_listing_be_challenged(&self, listing: &ListingData) -> bool {
        let challengeable_status = self.is_in_application_phase(listing) || listing.is_whitelisted;
        let no_live_challenge =
            listing.challenge_id.is_none() || listing.challenge.as_ref().map_or(false, |c| c.resolved);

        listing.app_expiry != 0 && challengeable_status && no_live_challenge
    }

    fn is_awaiting_appeal_request(&self, listing: &ListingData) -> bool {
        match listing.challenge.as_ref() {
            Some(challenge) => {
                !challenge.resolved
                    && self.is_voting_over(&challenge.poll)
                    && !self.passed(challenge.request_appeal_expiry)
                    && challenge.appeal.is_none()
            }
            None => false,
        }
    }
}
