//! # Civil Core - Registry Lifecycle Rules
//!
//! This crate contains the pure lifecycle logic of the newsroom registry,
//! shared by the selectors and the inspector. It provides:
//!
//! - Injectable clocks for deadline comparisons
//! - The `DomainRules` predicate contract and its deadline-driven implementation
//! - Listing phase classification support: expiries and countdown timing
//! - Vote result percentages

pub mod clock;
pub mod phase;
pub mod results;
pub mod rules;

// Re-export commonly used items
pub use clock::{is_deadline_passed, Clock, FixedClock, SystemClock};
pub use phase::{listing_expiry, phase_timing, ListingPhase, PhaseTiming};
pub use results::ChallengeResults;
pub use rules::{appeal_challenge_of, appeal_of, CivilRules, DomainRules};
