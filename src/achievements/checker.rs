//! Achievement checking logic
//!
//! Evaluates every locked achievement against a profile snapshot and the
//! current event. Unlocks are monotonic: an id already in the profile is
//! never evaluated again.

use std::collections::HashSet;

use chrono::Utc;

use super::definitions::{ACHIEVEMENTS, EventContext};
use crate::profile::{Profile, UnlockedAchievement};

/// Achievements that hold for this event and are not yet unlocked, in
/// registry order
pub fn check_achievements(profile: &Profile, ctx: &EventContext<'_>) -> Vec<UnlockedAchievement> {
    let unlocked: HashSet<&str> = profile.achievements.iter().map(|a| a.id.as_str()).collect();
    let unlocked_at = ctx.now.with_timezone(&Utc);

    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.contains(a.id.as_str()))
        .filter(|a| (a.check)(profile, ctx))
        .map(|a| UnlockedAchievement {
            id: a.id.as_str().to_string(),
            unlocked_at,
        })
        .collect()
}

/// Append unlocks to the profile, skipping ids it already holds
pub fn record_unlocks(profile: &mut Profile, unlocks: &[UnlockedAchievement]) {
    for unlock in unlocks {
        if !profile.has_achievement(&unlock.id) {
            profile.achievements.push(unlock.clone());
        }
    }
}
