//! Newsroom contract state

use serde::{Deserialize, Serialize};

use crate::address::EthAddress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsroomData {
    pub name: String,
    #[serde(default)]
    pub owners: Vec<EthAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsroomWrapper {
    pub address: EthAddress,
    pub data: NewsroomData,
}

/// Newsroom entry in the snapshot, keyed by the newsroom address (which is
/// also the listing address)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsroomState {
    pub wrapper: NewsroomWrapper,
}

impl NewsroomState {
    pub fn is_owner(&self, account: &EthAddress) -> bool {
        self.wrapper.data.owners.iter().any(|owner| owner == account)
    }
}
