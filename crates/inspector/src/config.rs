use std::collections::HashSet;
use std::fs;

use serde::{Deserialize, Serialize};

use civil_types::{CivilError, EthAddress};

use crate::error::{InspectorError, InspectorResult};

/// Inspector configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InspectorConfig {
    /// Seconds between inspection passes
    pub poll_interval_secs: u64,

    /// Account to evaluate voter eligibility for, replacing the snapshot's
    /// connected user
    #[serde(default)]
    pub user_address: Option<EthAddress>,

    /// Where snapshots come from and how deadlines are evaluated
    pub client: ClientConfig,

    /// Listings to report on
    pub listings: Vec<WatchedListing>,
}

/// Snapshot source settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// JSON snapshot dump written by the sync layer
    pub snapshot_path: String,

    /// Evaluate deadlines at this unix time instead of wall time
    #[serde(default)]
    pub evaluation_time: Option<u64>,
}

/// One listing under watch
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WatchedListing {
    /// Display name for logging
    pub name: String,

    /// Listing (newsroom) contract address
    pub address: EthAddress,

    /// Whether this listing is inspected
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl InspectorConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> InspectorResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| InspectorError::Io(format!("Failed to read config file {}: {}", path, e)))?;

        let config: InspectorConfig = toml::from_str(&content).map_err(|e| {
            InspectorError::InvalidConfig(format!("Failed to parse config file {}: {}", path, e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> InspectorResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| InspectorError::Io(format!("Failed to write config file {}: {}", path, e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> InspectorResult<()> {
        if self.listings.is_empty() {
            return Err(CivilError::invalid_parameter("listings", "empty", "at least one listing").into());
        }

        if self.poll_interval_secs == 0 {
            return Err(CivilError::invalid_parameter("poll_interval_secs", "0", "greater than 0").into());
        }

        self.client.validate()?;

        let mut seen = HashSet::new();
        for listing in &self.listings {
            listing.validate()?;
            if !seen.insert(&listing.address) {
                return Err(CivilError::invalid_parameter(
                    "listings.address",
                    listing.address.as_str(),
                    "each listing at most once",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Enabled listings in configuration order
    pub fn enabled_listings(&self) -> Vec<&WatchedListing> {
        self.listings.iter().filter(|l| l.enabled).collect()
    }
}

impl ClientConfig {
    fn validate(&self) -> InspectorResult<()> {
        if self.snapshot_path.trim().is_empty() {
            return Err(CivilError::invalid_parameter("snapshot_path", "empty", "path to a snapshot file").into());
        }
        Ok(())
    }
}

impl WatchedListing {
    fn validate(&self) -> InspectorResult<()> {
        if self.name.is_empty() {
            return Err(CivilError::invalid_parameter("listing_name", "empty", "non-empty string").into());
        }

        if self.address.is_zero() {
            return Err(CivilError::invalid_parameter(
                "listings.address",
                self.address.as_str(),
                "a non-zero contract address",
            )
            .into());
        }

        Ok(())
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 15,
            user_address: None,
            client: ClientConfig::default(),
            listings: vec![],
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "snapshot.json".to_string(),
            evaluation_time: None,
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> InspectorResult<()> {
    let listing = |name: &str, address: &str| -> InspectorResult<WatchedListing> {
        Ok(WatchedListing {
            name: name.to_string(),
            address: EthAddress::parse(address)?,
            enabled: true,
        })
    };

    let example_config = InspectorConfig {
        poll_interval_secs: 30,
        user_address: Some(EthAddress::parse("0x00000000000000000000000000000000000000d1")?),
        client: ClientConfig {
            snapshot_path: "state/snapshot.json".to_string(),
            evaluation_time: None,
        },
        listings: vec![
            listing("The Colorado Sun", "0x00000000000000000000000000000000000000a1")?,
            listing("Block Club Chicago", "0x00000000000000000000000000000000000000a2")?,
        ],
    };

    example_config.save(path)?;
    Ok(())
}
