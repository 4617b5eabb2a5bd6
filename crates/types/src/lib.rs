/// Shared types for the Civil registry dapp
///
/// This crate provides the state snapshot data model, identifier
/// normalization and the shared error type used by the rules library,
/// the selectors and the inspector.

pub mod address;
pub mod challenge;
pub mod constants;
pub mod errors;
pub mod history;
pub mod ids;
pub mod listing;
pub mod newsroom;
pub mod parameters;
pub mod serde_helpers;
pub mod snapshot;
pub mod user;

// Re-export all public types
pub use address::*;
pub use challenge::*;
pub use constants::*;
pub use errors::*;
pub use history::*;
pub use ids::*;
pub use listing::*;
pub use newsroom::*;
pub use parameters::*;
pub use snapshot::*;
pub use user::*;

/// Result type alias using the shared error type
pub type CivilResult<T> = std::result::Result<T, CivilError>;
