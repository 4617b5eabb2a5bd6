//! # Lifecycle Walkthrough Tests
//!
//! Drives one listing through application, challenge, appeal and appeal
//! challenge by advancing a fixed clock, checking that the predicates hand
//! over from one stage to the next without gaps or overlaps.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use civil_core::*;
    use civil_types::*;

    fn addr(last: u8) -> EthAddress {
        EthAddress::parse(&format!("0x{:040x}", last)).unwrap()
    }

    fn poll(commit_end: u64, reveal_end: u64) -> PollData {
        PollData {
            commit_end_date: commit_end,
            reveal_end_date: reveal_end,
            vote_quorum: 50,
            votes_for: 0,
            votes_against: 0,
        }
    }

    /// Listing challenged during its application, appeal requested, granted,
    /// and the grant challenged in turn.
    fn appealed_listing() -> ListingData {
        ListingData {
            owner: addr(1),
            is_whitelisted: false,
            app_expiry: 1_000,
            unstaked_deposit: 500,
            challenge_id: ChallengeId::from(7u64),
            challenge: Some(ChallengeData {
                challenger: addr(2),
                reward_pool: 50,
                stake: 500,
                resolved: false,
                total_tokens: 0,
                poll: poll(2_000, 3_000),
                request_appeal_expiry: 4_000,
                appeal: Some(AppealData {
                    requester: addr(3),
                    appeal_fee_paid: 10,
                    appeal_phase_expiry: 5_000,
                    appeal_granted: true,
                    appeal_open_to_challenge_expiry: 6_000,
                    appeal_challenge_id: Some(ChallengeId::from(8u64)),
                    appeal_challenge: Some(AppealChallengeData {
                        challenger: addr(4),
                        reward_pool: 0,
                        stake: 10,
                        resolved: false,
                        total_tokens: 0,
                        poll: poll(7_000, 8_000),
                    }),
                }),
            }),
        }
    }

    #[test]
    fn test_commit_and_reveal_never_overlap() {
        let clock = Arc::new(FixedClock::new(0));
        let rules = CivilRules::new(clock.clone());
        let listing = appealed_listing();
        let challenge = listing.challenge.as_ref().unwrap();

        for now in (0..9_000).step_by(250) {
            clock.set(now);
            let commit = rules.is_challenge_in_commit_stage(challenge);
            let reveal = rules.is_challenge_in_reveal_stage(challenge);
            assert!(!(commit && reveal), "overlap at {}", now);

            let appeal_commit = rules.is_in_appeal_challenge_commit_phase(&listing);
            let appeal_reveal = rules.is_in_appeal_challenge_reveal_phase(&listing);
            assert!(!(appeal_commit && appeal_reveal), "appeal overlap at {}", now);
        }
    }

    #[test]
    fn test_expiry_walks_every_stage() {
        let clock = Arc::new(FixedClock::new(0));
        let rules = CivilRules::new(clock.clone());
        let listing = appealed_listing();

        let checkpoints = [
            (1_500, Some(2_000)),
            (2_500, Some(3_000)),
            (6_500, Some(7_000)),
            (7_500, Some(8_000)),
            (8_500, None),
        ];

        for (now, expected) in checkpoints {
            clock.set(now);
            assert_eq!(listing_expiry(&rules, &listing), expected, "at {}", now);
        }

        clock.set(8_500);
        assert!(rules.can_listing_appeal_challenge_be_resolved(&listing));
    }

    #[test]
    fn test_rules_are_object_safe() {
        let rules: Arc<dyn DomainRules> = Arc::new(CivilRules::new(FixedClock::new(1_500)));
        let listing = appealed_listing();

        assert!(rules.is_challenge_in_commit_stage(listing.challenge.as_ref().unwrap()));
        assert!(!rules.can_listing_be_challenged(&listing));
        assert_eq!(listing_expiry(rules.as_ref(), &listing), Some(2_000));
    }
}
