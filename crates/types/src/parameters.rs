//! Registry parameterizer values

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::CivilError;
use crate::CivilResult;

/// Stage lengths currently in force on the registry (seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSnapshot {
    pub apply_stage_len: u64,
    pub commit_stage_len: u64,
    pub reveal_stage_len: u64,
    pub request_appeal_len: u64,
    pub judge_appeal_len: u64,
    pub challenge_appeal_len: u64,
    pub challenge_appeal_commit_len: u64,
    pub challenge_appeal_reveal_len: u64,
}

impl ParameterSnapshot {
    /// Every stage must have a non-zero length
    pub fn validate(&self) -> CivilResult<()> {
        let stages = [
            ("apply_stage_len", self.apply_stage_len),
            ("commit_stage_len", self.commit_stage_len),
            ("reveal_stage_len", self.reveal_stage_len),
            ("request_appeal_len", self.request_appeal_len),
            ("judge_appeal_len", self.judge_appeal_len),
            ("challenge_appeal_len", self.challenge_appeal_len),
            ("challenge_appeal_commit_len", self.challenge_appeal_commit_len),
            ("challenge_appeal_reveal_len", self.challenge_appeal_reveal_len),
        ];

        for (name, value) in stages {
            if value == 0 {
                return Err(CivilError::invalid_parameter(name, "0", "greater than 0"));
            }
        }
        Ok(())
    }
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            apply_stage_len: DEFAULT_APPLY_STAGE_LEN,
            commit_stage_len: DEFAULT_COMMIT_STAGE_LEN,
            reveal_stage_len: DEFAULT_REVEAL_STAGE_LEN,
            request_appeal_len: DEFAULT_REQUEST_APPEAL_LEN,
            judge_appeal_len: DEFAULT_JUDGE_APPEAL_LEN,
            challenge_appeal_len: DEFAULT_CHALLENGE_APPEAL_LEN,
            challenge_appeal_commit_len: DEFAULT_CHALLENGE_APPEAL_COMMIT_LEN,
            challenge_appeal_reveal_len: DEFAULT_CHALLENGE_APPEAL_REVEAL_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(ParameterSnapshot::default().validate().is_ok());

        let broken = ParameterSnapshot {
            reveal_stage_len: 0,
            ..Default::default()
        };
        assert!(matches!(
            broken.validate(),
            Err(CivilError::InvalidParameter { ref parameter, .. }) if parameter == "reveal_stage_len"
        ));
    }
}
