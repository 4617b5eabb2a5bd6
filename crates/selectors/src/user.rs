//! # User Selectors
//!
//! Views over the connected account: newsroom ownership, the user's entry
//! for one challenge, and the eligibility sets that drive the
//! "reveal your vote", "claim your reward" and "rescue your tokens" prompts.
//!
//! The sets iterate the user-data map, so a challenge appears only when the
//! user has a recorded entry for it. Entries of other users are ignored.

use std::collections::BTreeSet;
use std::sync::Arc;

use civil_core::DomainRules;
use civil_types::{
    ChallengeId, ChallengeMap, ChallengeUserDataMap, NewsroomState, StateSnapshot,
    UserAccountState, UserChallengeData, UserChallengeDataMap,
};

use crate::accessors::{get_challenge_user_data, get_challenges, get_newsroom, get_user};
use crate::props::{ChallengeProps, ListingProps};
use crate::selector::Selector;

pub type ChallengeIdSet = BTreeSet<ChallengeId>;

type SetKey = (Arc<ChallengeMap>, Arc<ChallengeUserDataMap>, Arc<UserAccountState>);

pub type NewsroomOwnerSelector =
    Selector<ListingProps, (Option<Arc<NewsroomState>>, Arc<UserAccountState>), Option<bool>>;
pub type ChallengeUserDataMapSelector = Selector<
    ChallengeProps,
    (Arc<ChallengeUserDataMap>, Option<ChallengeId>),
    Option<Arc<UserChallengeDataMap>>,
>;
pub type UserChallengeDataSelector = Selector<
    ChallengeProps,
    (Option<Arc<UserChallengeDataMap>>, Arc<UserAccountState>),
    Option<UserChallengeData>,
>;
pub type UserChallengeSetSelector = Selector<(), SetKey, Option<ChallengeIdSet>>;

/// `None` while the newsroom is not loaded; `Some(false)` when no wallet
/// is connected.
pub fn make_get_is_user_newsroom_owner() -> NewsroomOwnerSelector {
    Selector::new(
        "is_user_newsroom_owner",
        |state: &StateSnapshot, props: &ListingProps| (get_newsroom(state, props), get_user(state)),
        |(newsroom, user): &(Option<Arc<NewsroomState>>, Arc<UserAccountState>)| {
            let newsroom = newsroom.as_ref()?;
            Some(user.address().map_or(false, |account| newsroom.is_owner(account)))
        },
    )
}

pub fn make_get_challenge_user_data_map() -> ChallengeUserDataMapSelector {
    Selector::new(
        "challenge_user_data_map",
        |state: &StateSnapshot, props: &ChallengeProps| {
            (get_challenge_user_data(state), props.challenge_id.clone())
        },
        |(user_data, challenge_id): &(Arc<ChallengeUserDataMap>, Option<ChallengeId>)| {
            user_data.get(challenge_id.as_ref()?).cloned()
        },
    )
}

/// The connected user's entry for the challenge in props
pub fn make_get_user_challenge_data() -> UserChallengeDataSelector {
    let user_data_map = make_get_challenge_user_data_map();
    Selector::new(
        "user_challenge_data",
        move |state: &StateSnapshot, props: &ChallengeProps| {
            (user_data_map.select(state, props), get_user(state))
        },
        |(user_data_map, user): &(Option<Arc<UserChallengeDataMap>>, Arc<UserAccountState>)| {
            let account = user.address()?;
            user_data_map.as_ref()?.get(account).cloned()
        },
    )
}

/// Collect the challenges whose entry for the current user matches `keep`.
fn collect_user_challenges<F>(
    challenges: &ChallengeMap,
    user_data: &ChallengeUserDataMap,
    user: &UserAccountState,
    keep: F,
) -> Option<ChallengeIdSet>
where
    F: Fn(&ChallengeId, &UserChallengeData, &ChallengeMap) -> bool,
{
    let account = user.address()?;
    let set = user_data
        .iter()
        .filter_map(|(challenge_id, per_user)| {
            let entry = per_user.get(account)?;
            keep(challenge_id, entry, challenges).then(|| challenge_id.clone())
        })
        .collect();
    Some(set)
}

fn user_set_input(state: &StateSnapshot, _: &()) -> SetKey {
    (get_challenges(state), get_challenge_user_data(state), get_user(state))
}

/// Revealed, on the winning side, and not yet collected
pub fn make_get_user_challenges_with_unclaimed_rewards() -> UserChallengeSetSelector {
    Selector::new(
        "user_challenges_with_unclaimed_rewards",
        user_set_input,
        |(challenges, user_data, user): &SetKey| {
            collect_user_challenges(challenges, user_data, user, |_, entry, _| {
                entry.has_unclaimed_reward()
            })
        },
    )
}

/// Committed but not revealed while the challenge is in its reveal stage
pub fn make_get_user_challenges_with_unrevealed_votes(
    rules: Arc<dyn DomainRules>,
) -> UserChallengeSetSelector {
    Selector::new(
        "user_challenges_with_unrevealed_votes",
        user_set_input,
        move |(challenges, user_data, user): &SetKey| {
            collect_user_challenges(challenges, user_data, user, |challenge_id, entry, challenges| {
                entry.has_unrevealed_commit()
                    && challenges
                        .get(challenge_id)
                        .map_or(false, |c| rules.is_challenge_in_reveal_stage(&c.challenge))
            })
        },
    )
}

/// Committed but never revealed on a challenge that has since resolved
pub fn make_get_user_challenges_with_rescue_tokens() -> UserChallengeSetSelector {
    Selector::new(
        "user_challenges_with_rescue_tokens",
        user_set_input,
        |(challenges, user_data, user): &SetKey| {
            collect_user_challenges(challenges, user_data, user, |challenge_id, entry, challenges| {
                entry.has_unrevealed_commit()
                    && challenges
                        .get(challenge_id)
                        .map_or(false, |c| c.challenge.resolved)
            })
        },
    )
}
