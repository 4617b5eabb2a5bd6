//! # Listing Phases
//!
//! The single "main" phase a listing is presented in, the expiry of the
//! timed phase it currently occupies, and the countdown bounds for that phase.

use serde::{Deserialize, Serialize};

use civil_types::{ListingData, ParameterSnapshot};

use crate::rules::{appeal_challenge_of, appeal_of, DomainRules};

/// Main lifecycle phase of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingPhase {
    Application,
    /// Application stage elapsed unchallenged; anyone may whitelist it
    ReadyToWhitelist,
    Whitelisted,
    ChallengeCommitVote,
    ChallengeRevealVote,
    AwaitingAppealRequest,
    AwaitingAppealJudgment,
    AwaitingAppealChallenge,
    AppealChallengeCommitVote,
    AppealChallengeRevealVote,
    /// A challenge, appeal or appeal challenge waits for someone to resolve it
    ReadyToResolve,
    Rejected,
}

impl ListingPhase {
    /// Phases that end at a fixed deadline
    pub fn is_timed(&self) -> bool {
        matches!(
            self,
            ListingPhase::Application
                | ListingPhase::ChallengeCommitVote
                | ListingPhase::ChallengeRevealVote
                | ListingPhase::AwaitingAppealRequest
                | ListingPhase::AwaitingAppealJudgment
                | ListingPhase::AwaitingAppealChallenge
                | ListingPhase::AppealChallengeCommitVote
                | ListingPhase::AppealChallengeRevealVote
        )
    }

    pub fn is_under_challenge(&self) -> bool {
        matches!(
            self,
            ListingPhase::ChallengeCommitVote
                | ListingPhase::ChallengeRevealVote
                | ListingPhase::AwaitingAppealRequest
                | ListingPhase::AwaitingAppealJudgment
                | ListingPhase::AwaitingAppealChallenge
                | ListingPhase::AppealChallengeCommitVote
                | ListingPhase::AppealChallengeRevealVote
                | ListingPhase::ReadyToResolve
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ListingPhase::Application => "Application",
            ListingPhase::ReadyToWhitelist => "Ready to Whitelist",
            ListingPhase::Whitelisted => "Whitelisted",
            ListingPhase::ChallengeCommitVote => "Commit Vote",
            ListingPhase::ChallengeRevealVote => "Reveal Vote",
            ListingPhase::AwaitingAppealRequest => "Request Appeal",
            ListingPhase::AwaitingAppealJudgment => "Appeal to Council",
            ListingPhase::AwaitingAppealChallenge => "Challenge Council Decision",
            ListingPhase::AppealChallengeCommitVote => "Appeal Challenge Commit Vote",
            ListingPhase::AppealChallengeRevealVote => "Appeal Challenge Reveal Vote",
            ListingPhase::ReadyToResolve => "Ready to Resolve",
            ListingPhase::Rejected => "Rejected",
        }
    }
}

/// End time and total length of the phase a countdown is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTiming {
    pub end_time: u64,
    pub phase_length: u64,
}

impl PhaseTiming {
    /// Seconds left at `now`, zero once the phase ended
    pub fn remaining(&self, now: u64) -> u64 {
        self.end_time.saturating_sub(now)
    }
}

/// Expiry of the timed phase the listing is currently in.
///
/// `None` outside of timed phases, which is what keeps the snapshot's
/// "expiry defined iff timed phase" invariant true.
pub fn listing_expiry(rules: &dyn DomainRules, listing: &ListingData) -> Option<u64> {
    if let Some(challenge) = listing.challenge.as_ref().filter(|c| !c.resolved) {
        if rules.is_challenge_in_commit_stage(challenge) {
            return Some(challenge.poll.commit_end_date);
        }
        if rules.is_challenge_in_reveal_stage(challenge) {
            return Some(challenge.poll.reveal_end_date);
        }
        if rules.is_awaiting_appeal_request(listing) {
            return Some(challenge.request_appeal_expiry);
        }
        if let Some(appeal) = appeal_of(listing) {
            if rules.is_appeal_awaiting_judgment(appeal) {
                return Some(appeal.appeal_phase_expiry);
            }
            if rules.is_awaiting_appeal_challenge(appeal) {
                return Some(appeal.appeal_open_to_challenge_expiry);
            }
        }
        if let Some(appeal_challenge) = appeal_challenge_of(listing) {
            if rules.is_appeal_challenge_in_commit_stage(appeal_challenge) {
                return Some(appeal_challenge.poll.commit_end_date);
            }
            if rules.is_appeal_challenge_in_reveal_stage(appeal_challenge) {
                return Some(appeal_challenge.poll.reveal_end_date);
            }
        }
        return None;
    }

    if rules.is_in_application_phase(listing) {
        return Some(listing.app_expiry);
    }
    None
}

/// Countdown bounds for `phase`, `None` for untimed phases or when the
/// listing lacks the record the phase refers to
pub fn phase_timing(
    phase: ListingPhase,
    listing: &ListingData,
    parameters: &ParameterSnapshot,
) -> Option<PhaseTiming> {
    let challenge = listing.challenge.as_ref();
    let appeal = appeal_of(listing);
    let appeal_challenge = appeal_challenge_of(listing);

    let (end_time, phase_length) = match phase {
        ListingPhase::Application => (listing.app_expiry, parameters.apply_stage_len),
        ListingPhase::ChallengeCommitVote => {
            (challenge?.poll.commit_end_date, parameters.commit_stage_len)
        }
        ListingPhase::ChallengeRevealVote => {
            (challenge?.poll.reveal_end_date, parameters.reveal_stage_len)
        }
        ListingPhase::AwaitingAppealRequest => {
            (challenge?.request_appeal_expiry, parameters.request_appeal_len)
        }
        ListingPhase::AwaitingAppealJudgment => {
            (appeal?.appeal_phase_expiry, parameters.judge_appeal_len)
        }
        ListingPhase::AwaitingAppealChallenge => (
            appeal?.appeal_open_to_challenge_expiry,
            parameters.challenge_appeal_len,
        ),
        ListingPhase::AppealChallengeCommitVote => (
            appeal_challenge?.poll.commit_end_date,
            parameters.challenge_appeal_commit_len,
        ),
        ListingPhase::AppealChallengeRevealVote => (
            appeal_challenge?.poll.reveal_end_date,
            parameters.challenge_appeal_reveal_len,
        ),
        ListingPhase::ReadyToWhitelist
        | ListingPhase::Whitelisted
        | ListingPhase::ReadyToResolve
        | ListingPhase::Rejected => return None,
    };

    Some(PhaseTiming {
        end_time,
        phase_length,
    })
}
