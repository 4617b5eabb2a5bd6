//! Serializable results of one inspection pass

use serde::Serialize;

use civil_core::{ChallengeResults, ListingPhase};
use civil_selectors::{ChallengeIdSet, ChallengeState, ListingPhaseState};
use civil_types::{ChallengeId, EthAddress, TimestampedEvent, UserChallengeData};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    /// Unix time the rules were evaluated at
    pub evaluated_at: u64,
    pub listings: Vec<ListingReport>,
    pub user: UserReport,
}

/// View-state of one watched listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingReport {
    pub name: String,
    pub address: EthAddress,
    /// `false` while the listing is absent from the snapshot
    pub loaded: bool,
    pub phase: Option<ListingPhase>,
    pub phase_name: Option<&'static str>,
    /// End of the current timed phase, derived from the rules
    pub expiry: Option<u64>,
    /// Expiry stamped into the snapshot by the sync layer
    pub recorded_expiry: Option<u64>,
    /// `expiry` rendered as RFC 3339
    pub expires_at: Option<String>,
    pub seconds_remaining: Option<u64>,
    pub flags: Option<ListingPhaseState>,
    pub challenge: Option<ChallengeReport>,
    pub latest_event: Option<TimestampedEvent>,
    pub latest_challenge_succeeded: Option<ChallengeId>,
    pub whitelisted_at: Option<u64>,
    pub removed_at: Option<u64>,
    pub user_is_owner: Option<bool>,
}

/// The listing's current or most recent challenge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeReport {
    pub challenge_id: ChallengeId,
    pub state: Option<ChallengeState>,
    pub results: Option<ChallengeResults>,
    /// Whether the "for" side met the poll's vote quorum
    pub passed_quorum: Option<bool>,
    pub user_vote: Option<UserChallengeData>,
}

/// Voter eligibility of the inspected account
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserReport {
    pub account: Option<EthAddress>,
    pub unclaimed_rewards: Option<ChallengeIdSet>,
    pub unrevealed_votes: Option<ChallengeIdSet>,
    pub rescue_tokens: Option<ChallengeIdSet>,
}

/// Format a unix timestamp for humans
pub fn format_timestamp(timestamp: u64) -> Option<String> {
    let seconds = i64::try_from(timestamp).ok()?;
    chrono::DateTime::from_timestamp(seconds, 0).map(|dt| dt.to_rfc3339())
}
