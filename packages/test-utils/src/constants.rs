use civil_types::SECONDS_PER_DAY;

/// Wall time every fixture starts at
pub const BASE_TIME: u64 = 1_600_000_000;

pub const DAY: u64 = SECONDS_PER_DAY;

pub const NEWSROOM_ADDRESS: &str = "0x00000000000000000000000000000000000000a1";
pub const SECOND_NEWSROOM_ADDRESS: &str = "0x00000000000000000000000000000000000000a2";
pub const OWNER_ADDRESS: &str = "0x00000000000000000000000000000000000000b1";
pub const CHALLENGER_ADDRESS: &str = "0x00000000000000000000000000000000000000c1";
pub const APPEAL_REQUESTER_ADDRESS: &str = "0x00000000000000000000000000000000000000c2";
pub const VOTER_ADDRESS: &str = "0x00000000000000000000000000000000000000d1";
pub const OTHER_VOTER_ADDRESS: &str = "0x00000000000000000000000000000000000000d2";

pub const DEPOSIT: u128 = 10_000;
