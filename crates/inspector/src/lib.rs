pub mod client;
pub mod config;
pub mod error;
pub mod inspector;
pub mod report;

pub use client::{CivilClient, FileSnapshotSource, SnapshotSource};
pub use config::{create_example_config, ClientConfig, InspectorConfig, WatchedListing};
pub use error::{InspectorError, InspectorResult};
pub use inspector::{Inspector, ListingSelectors, UserSelectors};
pub use report::{ChallengeReport, InspectionReport, ListingReport, UserReport};
