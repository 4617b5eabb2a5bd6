//! Vote tallies of a finished (or running) poll

use serde::{Deserialize, Serialize};

use civil_types::{PollData, PERCENT_DENOMINATOR};

/// Totals and whole-number percentages shown on a challenge result chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResults {
    pub total_votes: u128,
    pub votes_for: u128,
    pub votes_against: u128,
    pub percent_for: u8,
    pub percent_against: u8,
}

impl ChallengeResults {
    pub fn from_poll(poll: &PollData) -> Self {
        let total_votes = poll.total_votes();
        let (percent_for, percent_against) = if total_votes == 0 {
            (0, 0)
        } else {
            let percent_for = percent_of(poll.votes_for, total_votes);
            (percent_for, 100 - percent_for)
        };

        Self {
            total_votes,
            votes_for: poll.votes_for,
            votes_against: poll.votes_against,
            percent_for,
            percent_against,
        }
    }

    /// Whether the "for" side met the poll's quorum
    pub fn passed_quorum(&self, vote_quorum: u8) -> bool {
        self.total_votes > 0 && self.percent_for > vote_quorum
    }
}

/// `part * 100 / total`, rounded down. `part <= total`.
fn percent_of(part: u128, total: u128) -> u8 {
    let percent = match part.checked_mul(PERCENT_DENOMINATOR) {
        Some(scaled) => scaled / total,
        // Large tallies: scale the denominator down instead
        None => part / (total / PERCENT_DENOMINATOR).max(1),
    };
    percent.min(PERCENT_DENOMINATOR) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn poll(votes_for: u128, votes_against: u128) -> PollData {
        PollData {
            commit_end_date: 0,
            reveal_end_date: 0,
            vote_quorum: 50,
            votes_for,
            votes_against,
        }
    }

    #[test]
    fn test_percentages() {
        let results = ChallengeResults::from_poll(&poll(30, 70));
        assert_eq!(results.total_votes, 100);
        assert_eq!(results.percent_for, 30);
        assert_eq!(results.percent_against, 70);
        assert!(!results.passed_quorum(50));
    }

    #[test]
    fn test_no_votes() {
        let results = ChallengeResults::from_poll(&poll(0, 0));
        assert_eq!(results.percent_for, 0);
        assert_eq!(results.percent_against, 0);
        assert!(!results.passed_quorum(0));
    }

    #[test]
    fn test_huge_tallies_do_not_overflow() {
        let results = ChallengeResults::from_poll(&poll(u128::MAX / 2, u128::MAX / 2));
        assert_eq!(results.percent_for, 50);
        assert_eq!(results.percent_against, 50);
    }

    proptest! {
        #[test]
        fn prop_percentages_sum_to_100(votes_for in 0u128..1_000_000_000_000_000_000_000, votes_against in 0u128..1_000_000_000_000_000_000_000) {
            prop_assume!(votes_for + votes_against > 0);
            let results = ChallengeResults::from_poll(&poll(votes_for, votes_against));
            prop_assert_eq!(results.percent_for as u32 + results.percent_against as u32, 100);
        }
    }
}
