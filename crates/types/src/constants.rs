//! # Registry Constants
//!
//! Default stage lengths of the registry parameterizer, used when a snapshot
//! does not carry its own parameter values. All durations are in seconds.

// ============================================================================
// Time Constants
// ============================================================================

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

// ============================================================================
// Registry Stage Lengths
// ============================================================================

/// Length of the application stage
pub const DEFAULT_APPLY_STAGE_LEN: u64 = 14 * SECONDS_PER_DAY;

/// Length of the commit stage of a challenge poll
pub const DEFAULT_COMMIT_STAGE_LEN: u64 = 10 * SECONDS_PER_DAY;

/// Length of the reveal stage of a challenge poll
pub const DEFAULT_REVEAL_STAGE_LEN: u64 = 7 * SECONDS_PER_DAY;

/// Window after a challenge vote in which an appeal may be requested
pub const DEFAULT_REQUEST_APPEAL_LEN: u64 = 5 * SECONDS_PER_DAY;

/// Window in which the council judges an appeal
pub const DEFAULT_JUDGE_APPEAL_LEN: u64 = 14 * SECONDS_PER_DAY;

/// Window in which a granted appeal may itself be challenged
pub const DEFAULT_CHALLENGE_APPEAL_LEN: u64 = 7 * SECONDS_PER_DAY;

/// Commit stage of an appeal challenge poll
pub const DEFAULT_CHALLENGE_APPEAL_COMMIT_LEN: u64 = 7 * SECONDS_PER_DAY;

/// Reveal stage of an appeal challenge poll
pub const DEFAULT_CHALLENGE_APPEAL_REVEAL_LEN: u64 = 7 * SECONDS_PER_DAY;

// ============================================================================
// Voting
// ============================================================================

/// Percentages are reported in whole percent
pub const PERCENT_DENOMINATOR: u128 = 100;
