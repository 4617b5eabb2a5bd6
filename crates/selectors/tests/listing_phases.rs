//! # Listing And Challenge View Tests
//!
//! Drives a listing through its lifecycle with the fixed clock and checks
//! the listing-scoped and challenge-scoped selectors at each stop.

#[cfg(test)]
mod tests {
    use civil_core::{ListingPhase, PhaseTiming};
    use civil_selectors::*;
    use civil_test_utils::*;
    use civil_types::{
        ChallengeId, ListingData, ListingEvent, ListingExtendedMetadata, TimestampedEvent,
        DEFAULT_APPLY_STAGE_LEN, DEFAULT_JUDGE_APPEAL_LEN, DEFAULT_REVEAL_STAGE_LEN,
    };
    use proptest::prelude::*;

    fn props() -> ListingProps {
        ListingProps::parse(NEWSROOM_ADDRESS).unwrap()
    }

    fn main_phase(ctx: &TestContext) -> ListingPhase {
        make_get_listing_phase_state(ctx.dyn_rules())
            .select(&ctx.state, &props())
            .unwrap()
            .main_phase()
    }

    #[test]
    fn test_missing_listing_address_yields_nothing() {
        let mut ctx = TestContext::at_base_time();
        ctx.add_listing(NEWSROOM_ADDRESS, applied_listing(BASE_TIME + DAY));
        let none = ListingProps::default();

        assert_eq!(make_get_listing().select(&ctx.state, &none), None);
        assert_eq!(make_get_listing_expiry().select(&ctx.state, &none), None);
        assert_eq!(make_get_listing_phase_state(ctx.dyn_rules()).select(&ctx.state, &none), None);
        assert_eq!(make_get_listing_phase_timing(ctx.dyn_rules()).select(&ctx.state, &none), None);
        assert_eq!(make_get_is_user_newsroom_owner().select(&ctx.state, &none), None);
        assert_eq!(make_get_latest_listing_event().select(&ctx.state, &none), None);
        assert_eq!(make_get_latest_whitelisted_timestamp().select(&ctx.state, &none), None);
        assert_eq!(make_get_challenge_state(ctx.dyn_rules()).select(&ctx.state, &ChallengeProps::default()), None);
    }

    #[test]
    fn test_current_expiry_ignores_stamped_value() {
        let mut ctx = TestContext::at_base_time();
        let app_expiry = BASE_TIME + DAY;
        ctx.add_listing(NEWSROOM_ADDRESS, applied_listing(app_expiry));
        let current = make_get_listing_current_expiry(ctx.dyn_rules());
        assert_eq!(current.select(&ctx.state, &props()), Some(app_expiry));

        // Stamp goes stale once the application window closes
        ctx.advance(DAY + 1);
        current.invalidate();
        assert_eq!(make_get_listing_expiry().select(&ctx.state, &props()), Some(app_expiry));
        assert_eq!(current.select(&ctx.state, &props()), None);
        assert_eq!(current.select(&ctx.state, &ListingProps::default()), None);
    }

    #[test]
    fn test_application_to_whitelist() {
        let mut ctx = TestContext::at_base_time();
        let app_expiry = BASE_TIME + 3 * DAY;
        ctx.add_listing(NEWSROOM_ADDRESS, applied_listing(app_expiry));

        let listing = make_get_listing().select(&ctx.state, &props()).unwrap();
        assert_eq!(listing.address, address(NEWSROOM_ADDRESS));
        assert_eq!(make_get_listing_expiry().select(&ctx.state, &props()), Some(app_expiry));

        let state = make_get_listing_phase_state(ctx.dyn_rules())
            .select(&ctx.state, &props())
            .unwrap();
        assert!(state.is_in_application);
        assert!(state.can_be_challenged);
        assert!(!state.is_rejected);
        assert_eq!(state.is_under_challenge, None);
        assert_eq!(state.in_challenge_commit_vote_phase, None);
        assert_eq!(state.main_phase(), ListingPhase::Application);

        let timing = make_get_listing_phase_timing(ctx.dyn_rules())
            .select(&ctx.state, &props())
            .unwrap();
        assert_eq!(
            timing.timing,
            Some(PhaseTiming {
                end_time: app_expiry,
                phase_length: DEFAULT_APPLY_STAGE_LEN,
            })
        );

        ctx.set_time(app_expiry + 1);
        ctx.resync_expiries();
        assert_eq!(make_get_listing_expiry().select(&ctx.state, &props()), None);
        assert_eq!(main_phase(&ctx), ListingPhase::ReadyToWhitelist);

        ctx.add_listing(NEWSROOM_ADDRESS, whitelisted_listing(app_expiry));
        assert_eq!(main_phase(&ctx), ListingPhase::Whitelisted);
    }

    #[test]
    fn test_challenge_through_appeal() {
        let mut ctx = TestContext::at_base_time();
        ctx.add_listing(NEWSROOM_ADDRESS, whitelisted_listing(BASE_TIME - 30 * DAY));

        let commit_end = BASE_TIME + DAY;
        let reveal_end = commit_end + DEFAULT_REVEAL_STAGE_LEN;
        ctx.add_challenge(NEWSROOM_ADDRESS, 7u64, challenge(commit_end, reveal_end));

        let state = make_get_listing_phase_state(ctx.dyn_rules())
            .select(&ctx.state, &props())
            .unwrap();
        assert_eq!(state.is_under_challenge, Some(true));
        assert_eq!(state.in_challenge_commit_vote_phase, Some(true));
        assert_eq!(state.in_challenge_reveal_phase, Some(false));
        assert_eq!(state.can_resolve_challenge, Some(false));
        assert!(!state.can_be_challenged);
        assert!(!state.is_rejected);
        assert_eq!(state.main_phase(), ListingPhase::ChallengeCommitVote);
        assert_eq!(make_get_listing_expiry().select(&ctx.state, &props()), Some(commit_end));

        ctx.set_time(commit_end + 1);
        assert_eq!(main_phase(&ctx), ListingPhase::ChallengeRevealVote);

        ctx.set_time(reveal_end + 1);
        assert_eq!(main_phase(&ctx), ListingPhase::AwaitingAppealRequest);

        let mut appealed = challenge(commit_end, reveal_end);
        let judgment_end = reveal_end + DAY + DEFAULT_JUDGE_APPEAL_LEN;
        appealed.appeal = Some(pending_appeal(judgment_end));
        ctx.add_challenge(NEWSROOM_ADDRESS, 7u64, appealed.clone());
        assert_eq!(main_phase(&ctx), ListingPhase::AwaitingAppealJudgment);

        let challenge_state = make_get_challenge_state(ctx.dyn_rules())
            .select(&ctx.state, &ChallengeProps::new(7u64))
            .unwrap();
        assert_eq!(challenge_state.is_awaiting_appeal_judgment, Some(true));
        assert_eq!(challenge_state.can_appeal_be_resolved, Some(false));
        assert!(!challenge_state.can_resolve_challenge);

        let timing = make_get_listing_phase_timing(ctx.dyn_rules())
            .select(&ctx.state, &props())
            .unwrap();
        assert_eq!(timing.phase, ListingPhase::AwaitingAppealJudgment);
        assert_eq!(timing.timing.map(|t| t.end_time), Some(judgment_end));

        let open_end = judgment_end + DAY;
        appealed.appeal = Some(granted_appeal(judgment_end, open_end));
        ctx.add_challenge(NEWSROOM_ADDRESS, 7u64, appealed.clone());
        assert_eq!(main_phase(&ctx), ListingPhase::AwaitingAppealChallenge);

        let mut appeal = granted_appeal(judgment_end, open_end);
        appeal.appeal_challenge_id = Some(ChallengeId::from(8u64));
        appeal.appeal_challenge = Some(appeal_challenge(open_end + DAY, open_end + 2 * DAY));
        appealed.appeal = Some(appeal);
        ctx.add_challenge(NEWSROOM_ADDRESS, 7u64, appealed);
        assert_eq!(main_phase(&ctx), ListingPhase::AppealChallengeCommitVote);

        ctx.set_time(open_end + DAY + 1);
        assert_eq!(main_phase(&ctx), ListingPhase::AppealChallengeRevealVote);

        ctx.set_time(open_end + 2 * DAY + 1);
        let state = make_get_listing_phase_state(ctx.dyn_rules())
            .select(&ctx.state, &props())
            .unwrap();
        assert!(state.can_listing_appeal_challenge_be_resolved);
        assert_eq!(state.main_phase(), ListingPhase::ReadyToResolve);
    }

    #[test]
    fn test_challenge_lookup_by_id() {
        let mut ctx = TestContext::at_base_time();
        ctx.add_listing(NEWSROOM_ADDRESS, whitelisted_listing(BASE_TIME - 30 * DAY));

        let mut tallied = resolved_challenge(BASE_TIME - 10 * DAY, BASE_TIME - 3 * DAY);
        tallied.poll.votes_for = 300;
        tallied.poll.votes_against = 100;
        ctx.add_challenge(NEWSROOM_ADDRESS, 12u64, tallied);

        let props = ChallengeProps::parse("12").unwrap();
        assert_eq!(
            make_get_listing_address_by_challenge_id().select(&ctx.state, &props),
            Some(address(NEWSROOM_ADDRESS))
        );
        assert_eq!(
            make_get_listing_address_by_challenge_id().select(&ctx.state, &ChallengeProps::new(13u64)),
            None
        );

        let results = make_get_challenge_results().select(&ctx.state, &props).unwrap();
        assert_eq!(results.total_votes, 400);
        assert_eq!(results.percent_for, 75);
        assert_eq!(results.percent_against, 25);

        let state = make_get_challenge_state(ctx.dyn_rules())
            .select(&ctx.state, &props)
            .unwrap();
        assert!(state.is_resolved);
        assert!(!state.in_reveal_phase);
        assert_eq!(state.is_awaiting_appeal_judgment, None);
        assert_eq!(state.is_awaiting_appeal_challenge, None);
        assert_eq!(state.can_appeal_be_resolved, None);
    }

    #[test]
    fn test_removed_listing_is_rejected() {
        let mut ctx = TestContext::at_base_time();
        ctx.add_listing(NEWSROOM_ADDRESS, removed_listing());

        let state = make_get_listing_phase_state(ctx.dyn_rules())
            .select(&ctx.state, &props())
            .unwrap();
        assert!(state.is_rejected);
        assert_eq!(state.main_phase(), ListingPhase::Rejected);
        assert_eq!(make_get_listing_expiry().select(&ctx.state, &props()), None);
    }

    #[test]
    fn test_newsroom_ownership() {
        let mut ctx = TestContext::at_base_time();
        let selector = make_get_is_user_newsroom_owner();

        assert_eq!(selector.select(&ctx.state, &props()), None);

        ctx.add_newsroom(NEWSROOM_ADDRESS, "The Daily Planet", &[OWNER_ADDRESS]);
        assert_eq!(selector.select(&ctx.state, &props()), Some(false));

        ctx.connect_user(VOTER_ADDRESS);
        assert_eq!(selector.select(&ctx.state, &props()), Some(false));

        ctx.connect_user(OWNER_ADDRESS);
        assert_eq!(selector.select(&ctx.state, &props()), Some(true));
    }

    #[test]
    fn test_extended_metadata_zero_means_absent() {
        let mut ctx = TestContext::at_base_time();
        ctx.state = ctx.state.with_extended_metadata(
            address(NEWSROOM_ADDRESS),
            ListingExtendedMetadata {
                latest_challenge_id: Some(ChallengeId::none()),
                listing_removed_timestamp: Some(0),
                whitelisted_timestamp: Some(BASE_TIME),
            },
        );

        assert_eq!(
            make_get_latest_challenge_succeeded_challenge_id().select(&ctx.state, &props()),
            None
        );
        assert_eq!(make_get_latest_listing_removed_timestamp().select(&ctx.state, &props()), None);
        assert_eq!(make_get_latest_whitelisted_timestamp().select(&ctx.state, &props()), Some(BASE_TIME));

        ctx.state = ctx.state.with_extended_metadata(
            address(NEWSROOM_ADDRESS),
            ListingExtendedMetadata {
                latest_challenge_id: Some(ChallengeId::from(4u64)),
                ..Default::default()
            },
        );
        assert_eq!(
            make_get_latest_challenge_succeeded_challenge_id().select(&ctx.state, &props()),
            Some(ChallengeId::from(4u64))
        );
        assert_eq!(make_get_latest_whitelisted_timestamp().select(&ctx.state, &props()), None);
    }

    #[test]
    fn test_latest_listing_event() {
        let mut ctx = TestContext::at_base_time();
        let listing = address(NEWSROOM_ADDRESS);
        let selector = make_get_latest_listing_event();

        ctx.state = ctx.state.with_history_event(
            listing.clone(),
            TimestampedEvent {
                timestamp: BASE_TIME - 20 * DAY,
                block_number: 10,
                transaction_hash: None,
                event: ListingEvent::Application {
                    applicant: address(OWNER_ADDRESS),
                    deposit: DEPOSIT,
                    app_end_date: BASE_TIME - 6 * DAY,
                },
            },
        );
        ctx.state = ctx.state.with_history_event(
            listing.clone(),
            TimestampedEvent {
                timestamp: BASE_TIME - 5 * DAY,
                block_number: 20,
                transaction_hash: None,
                event: ListingEvent::ApplicationWhitelisted,
            },
        );

        let latest = selector.select(&ctx.state, &props()).unwrap();
        assert_eq!(latest.event, ListingEvent::ApplicationWhitelisted);
        assert_eq!(selector.select(&ctx.state, &ListingProps::parse(SECOND_NEWSROOM_ADDRESS).unwrap()), None);
    }

    fn listing_strategy() -> impl Strategy<Value = ListingData> {
        (
            any::<bool>(),
            prop_oneof![Just(0u64), Just(BASE_TIME - DAY), Just(BASE_TIME + DAY)],
            prop::option::of((any::<bool>(), 0u8..3)),
        )
            .prop_map(|(is_whitelisted, app_expiry, challenge_shape)| {
                let base = ListingData {
                    is_whitelisted,
                    ..applied_listing(app_expiry)
                };
                match challenge_shape {
                    None => base,
                    Some((resolved, stage)) => {
                        let (commit_end, reveal_end) = match stage {
                            0 => (BASE_TIME + DAY, BASE_TIME + 2 * DAY),
                            1 => (BASE_TIME - DAY, BASE_TIME + DAY),
                            _ => (BASE_TIME - 3 * DAY, BASE_TIME - 2 * DAY),
                        };
                        let mut record = challenge(commit_end, reveal_end);
                        record.resolved = resolved;
                        challenged_listing(base, 3u64, record)
                    }
                }
            })
    }

    proptest! {
        #[test]
        fn prop_rejected_is_the_complement_of_live_states(listing in listing_strategy()) {
            let mut ctx = TestContext::at_base_time();
            let has_challenge = listing.challenge.is_some();
            ctx.add_listing(NEWSROOM_ADDRESS, listing);

            let state = make_get_listing_phase_state(ctx.dyn_rules())
                .select(&ctx.state, &props())
                .unwrap();

            let expected = !state.is_whitelisted
                && !state.is_in_application
                && !state.can_be_whitelisted
                && !has_challenge;
            prop_assert_eq!(state.is_rejected, expected);
            prop_assert_eq!(state.is_under_challenge.is_some(), has_challenge);
            prop_assert_eq!(state.in_challenge_commit_vote_phase.is_some(), has_challenge);
            if state.main_phase() == ListingPhase::Rejected {
                prop_assert!(!state.is_whitelisted && !state.is_in_application);
                prop_assert_ne!(state.is_under_challenge, Some(true));
            }
        }

        #[test]
        fn prop_expiry_present_iff_timed_phase(listing in listing_strategy()) {
            let mut ctx = TestContext::at_base_time();
            ctx.add_listing(NEWSROOM_ADDRESS, listing);

            let expiry = make_get_listing_expiry().select(&ctx.state, &props());
            let phase = main_phase(&ctx);
            prop_assert_eq!(expiry.is_some(), phase.is_timed());
        }
    }
}
