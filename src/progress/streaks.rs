//! Streak tracking system
//!
//! Tracks calendar-day streaks (overall and quest mode), the consecutive
//! test-run streak, and the quest-mode duration bonus.

use std::time::Duration;

use chrono::NaiveDate;

use crate::profile::{ActionKind, Profile};

/// Next value of a day streak given the last counted day.
///
/// `None` when `today` was already counted.
fn advance_day_streak(current: u32, last_day: Option<NaiveDate>, today: NaiveDate) -> Option<u32> {
    match last_day {
        Some(last) if last == today => None,
        Some(last) if (today - last).num_days() == 1 => Some(current + 1),
        _ => Some(1),
    }
}

/// Update the overall daily streak. Returns the new count if it changed.
pub fn update_streak(profile: &mut Profile, today: NaiveDate) -> Option<u32> {
    let next = advance_day_streak(profile.streak_days, profile.last_streak_date, today)?;
    profile.streak_days = next;
    profile.last_streak_date = Some(today);
    Some(next)
}

/// Update the quest-mode streak and its high-water mark.
///
/// Does nothing unless quest mode is on.
pub fn update_quest_streak(profile: &mut Profile, today: NaiveDate) -> Option<u32> {
    if !profile.quest_mode {
        return None;
    }
    let streaks = &mut profile.streaks;
    let next = advance_day_streak(streaks.quest_current, streaks.last_quest_day, today)?;
    streaks.quest_current = next;
    streaks.last_quest_day = Some(today);
    streaks.quest_longest = streaks.quest_longest.max(next);
    Some(next)
}

/// Count consecutive test runs while quest mode is on; anything else resets.
pub fn update_test_streak(profile: &mut Profile, action: ActionKind) -> u32 {
    if profile.quest_mode && action == ActionKind::Test {
        profile.streaks.test_streak += 1;
    } else {
        profile.streaks.test_streak = 0;
    }
    profile.streaks.test_streak
}

pub fn reset_test_streak(profile: &mut Profile) {
    profile.streaks.test_streak = 0;
}

/// Bonus XP for sustained work, tiered by elapsed time
pub fn duration_bonus(elapsed: Duration) -> u64 {
    const MINUTE: u64 = 60;
    match elapsed.as_secs() {
        s if s >= 15 * MINUTE => 100,
        s if s >= 5 * MINUTE => 50,
        s if s >= 2 * MINUTE => 25,
        _ => 0,
    }
}
