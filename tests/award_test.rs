//! Integration tests for awarding actions against a real store directory

mod common;

use std::collections::HashSet;
use std::fs;
use std::time::Duration;

use chrono::Duration as ChronoDuration;

use common::{ctx_at, local, manager, manager_with_history, utc, weekday_morning};
use devquest::class::CommitRecord;
use devquest::manager::{AwardOutcome, SkipReason};
use devquest::ActionKind;

fn ids(unlocks: &[devquest::profile::UnlockedAchievement]) -> Vec<&str> {
    unlocks.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn test_first_commit_on_fresh_profile() {
    let (_home, manager) = manager();

    let result = manager
        .award(ActionKind::Commit, &ctx_at(weekday_morning()))
        .unwrap();

    assert!(result.session_started);
    assert_eq!(result.xp, 50);
    assert_eq!(result.duration_bonus, 0);
    assert_eq!(result.level, 1);
    assert_eq!(result.current_xp, 50);
    assert_eq!(result.xp_to_next, 100);
    assert_eq!(result.xp_remaining, 50);
    assert_eq!(result.total_xp, 50);
    assert_eq!(result.streak_days, 1);
    assert_eq!(result.class, "Adventurer");
    assert_eq!(ids(&result.achievements), ["First Blood"]);

    let profile = manager.profile().unwrap();
    assert_eq!(profile.stats.commits, 1);
    assert_eq!(profile.session_xp, 50);
    assert_eq!(profile.session_actions.commits, 1);
    assert!(profile.has_achievement("First Blood"));
}

#[test]
fn test_century_unlocks_exactly_at_100() {
    let (_home, manager) = manager();
    let ctx = ctx_at(weekday_morning());

    let first = manager.award(ActionKind::Commit, &ctx).unwrap();
    assert!(!ids(&first.achievements).contains(&"Century"));

    let second = manager.award(ActionKind::Commit, &ctx).unwrap();
    assert_eq!(ids(&second.achievements), ["Century"]);
    assert_eq!(second.total_xp, 100);
    assert_eq!(second.level, 2);
    assert_eq!(second.current_xp, 0);
    assert_eq!(second.previous_level, 1);
    assert!(second.leveled_up());
    assert!(!second.session_started);
}

#[test]
fn test_achievements_are_never_duplicated() {
    let (_home, manager) = manager();
    let ctx = ctx_at(weekday_morning());

    for _ in 0..4 {
        manager.award(ActionKind::Test, &ctx).unwrap();
    }

    let profile = manager.profile().unwrap();
    let unique: HashSet<_> = profile.achievements.iter().map(|a| &a.id).collect();
    assert_eq!(unique.len(), profile.achievements.len());
    assert!(profile.has_achievement("Test Believer"));
}

#[test]
fn test_time_of_day_achievements_use_action_time() {
    let (_home, manager) = manager();

    let night = manager
        .award(ActionKind::Push, &ctx_at(local(2026, 3, 4, 2)))
        .unwrap();
    assert!(ids(&night.achievements).contains(&"Night Owl"));

    let weekend = manager
        .award(ActionKind::Push, &ctx_at(local(2026, 3, 7, 13)))
        .unwrap();
    let unlocked = ids(&weekend.achievements);
    assert!(unlocked.contains(&"Weekend Warrior"));
    assert!(!unlocked.contains(&"Night Owl"));
}

#[test]
fn test_bug_fix_commit_unlocks_bug_hunter() {
    let (_home, manager) = manager();

    let push = manager
        .award(
            ActionKind::Push,
            &ctx_at(weekday_morning()).with_message("Fix login bug"),
        )
        .unwrap();
    assert!(!ids(&push.achievements).contains(&"Bug Hunter"));

    let commit = manager
        .award(
            ActionKind::Commit,
            &ctx_at(weekday_morning()).with_message("Fix login bug"),
        )
        .unwrap();
    assert!(ids(&commit.achievements).contains(&"Bug Hunter"));
}

#[test]
fn test_unknown_action_writes_nothing() {
    let (_home, manager) = manager();

    let outcome = manager
        .award_for_action("dance", &ctx_at(weekday_morning()))
        .unwrap();

    assert_eq!(
        outcome,
        AwardOutcome::Skipped {
            reason: SkipReason::UnknownAction("dance".to_string())
        }
    );
    assert!(!manager.store().profile_path().exists());
}

#[test]
fn test_unknown_action_leaves_profile_unchanged() {
    let (_home, manager) = manager();
    manager
        .award_for_action("commit", &ctx_at(weekday_morning()))
        .unwrap();
    let before = fs::read(manager.store().profile_path()).unwrap();

    manager
        .award_for_action("COMMIT!", &ctx_at(weekday_morning()))
        .unwrap();

    let after = fs::read(manager.store().profile_path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_action_names_are_case_insensitive() {
    let (_home, manager) = manager();

    let outcome = manager
        .award_for_action("Deploy", &ctx_at(weekday_morning()))
        .unwrap();

    let result = outcome.awarded().expect("deploy should be awarded");
    assert_eq!(result.xp, 500);
    assert!(ids(&result.achievements).contains(&"Deployer"));
}

#[test]
fn test_duration_bonus_excluded_from_achievement_check() {
    let (_home, manager) = manager();
    let now = weekday_morning();
    manager.quest_on(utc(now)).unwrap();

    let ctx = ctx_at(now).with_elapsed(Duration::from_secs(15 * 60));
    let result = manager.award(ActionKind::Commit, &ctx).unwrap();

    assert_eq!(result.duration_bonus, 100);
    assert_eq!(result.total_awarded(), 150);
    assert_eq!(result.total_xp, 150);
    assert_eq!(result.level, 2);
    let unlocked = ids(&result.achievements);
    assert!(unlocked.contains(&"First Blood"));
    assert!(unlocked.contains(&"Marathon Runner"));
    assert!(!unlocked.contains(&"Century"));

    // The next action sees the bonus as part of lifetime XP
    let next = manager.award(ActionKind::Commit, &ctx_at(now)).unwrap();
    assert_eq!(next.total_xp, 200);
    assert_eq!(ids(&next.achievements), ["Century"]);
}

#[test]
fn test_no_duration_bonus_without_quest_mode() {
    let (_home, manager) = manager();

    let ctx = ctx_at(weekday_morning()).with_elapsed(Duration::from_secs(20 * 60));
    let result = manager.award(ActionKind::Commit, &ctx).unwrap();
    assert_eq!(result.duration_bonus, 0);
    assert_eq!(result.total_xp, 50);

    let bonus = manager.award_duration_bonus(&ctx).unwrap();
    assert_eq!(
        bonus,
        AwardOutcome::Skipped {
            reason: SkipReason::QuestModeOff
        }
    );
}

#[test]
fn test_standalone_duration_bonus() {
    let (_home, manager) = manager();
    let now = weekday_morning();
    manager.quest_on(utc(now)).unwrap();

    let skipped = manager.award_duration_bonus(&ctx_at(now)).unwrap();
    assert!(skipped.awarded().is_none());

    let short = ctx_at(now).with_elapsed(Duration::from_secs(90));
    assert_eq!(
        manager.award_duration_bonus(&short).unwrap(),
        AwardOutcome::Skipped {
            reason: SkipReason::NoBonus
        }
    );

    let focused = ctx_at(now).with_elapsed(Duration::from_secs(6 * 60));
    let outcome = manager.award_duration_bonus(&focused).unwrap();
    let result = outcome.awarded().expect("bonus should be awarded");
    assert_eq!(result.xp, 0);
    assert_eq!(result.duration_bonus, 50);
    assert_eq!(result.total_xp, 50);
    assert_eq!(result.quest_streak, 1);
    // First Blood is judged without the bonus itself
    assert!(result.achievements.is_empty());

    let profile = manager.profile().unwrap();
    assert_eq!(profile.stats.total(), 0);
    assert_eq!(profile.session_xp, 50);
}

#[test]
fn test_test_streak_requires_quest_mode() {
    let (_home, manager) = manager();
    let now = weekday_morning();
    let ctx = ctx_at(now);

    let result = manager.award(ActionKind::Test, &ctx).unwrap();
    assert_eq!(result.test_streak, 0);

    manager.quest_on(utc(now)).unwrap();
    manager.award(ActionKind::Test, &ctx).unwrap();
    let result = manager.award(ActionKind::Test, &ctx).unwrap();
    assert_eq!(result.test_streak, 2);

    let result = manager.award(ActionKind::Commit, &ctx).unwrap();
    assert_eq!(result.test_streak, 0);

    manager.award(ActionKind::Test, &ctx).unwrap();
    manager.quest_off(utc(now)).unwrap();
    assert_eq!(manager.profile().unwrap().streaks.test_streak, 0);
}

#[test]
fn test_daily_streak_across_days() {
    let (_home, manager) = manager();

    let day1 = manager
        .award(ActionKind::Commit, &ctx_at(local(2026, 3, 4, 10)))
        .unwrap();
    assert_eq!(day1.streak_days, 1);

    let same_day = manager
        .award(ActionKind::Commit, &ctx_at(local(2026, 3, 4, 16)))
        .unwrap();
    assert_eq!(same_day.streak_days, 1);

    let day2 = manager
        .award(ActionKind::Commit, &ctx_at(local(2026, 3, 5, 10)))
        .unwrap();
    assert_eq!(day2.streak_days, 2);

    let after_gap = manager
        .award(ActionKind::Commit, &ctx_at(local(2026, 3, 9, 10)))
        .unwrap();
    assert_eq!(after_gap.streak_days, 1);
}

#[test]
fn test_quest_streak_only_counts_quest_days() {
    let (_home, manager) = manager();

    manager
        .award(ActionKind::Commit, &ctx_at(local(2026, 3, 3, 10)))
        .unwrap();

    let start = local(2026, 3, 4, 10);
    manager.quest_on(utc(start)).unwrap();
    let first = manager.award(ActionKind::Commit, &ctx_at(start)).unwrap();
    assert_eq!(first.quest_streak, 1);
    assert_eq!(first.streak_days, 2);

    let next = manager
        .award(ActionKind::Commit, &ctx_at(local(2026, 3, 5, 10)))
        .unwrap();
    assert_eq!(next.quest_streak, 2);
    assert_eq!(next.quest_longest, 2);
}

#[test]
fn test_bug_heavy_history_selects_debug_dragon() {
    let history = vec![
        CommitRecord::new("Fix crash in parser", &["src/parser.rs"]),
        CommitRecord::new("Add tokenizer", &["src/lexer.rs"]),
        CommitRecord::new("hotfix: null check", &["src/main.rs"]),
        CommitRecord::new("Write docs", &["README.md"]),
        CommitRecord::new("Bump version", &["Cargo.toml"]),
    ];
    let (_home, manager) = manager_with_history(Some(history));

    let result = manager
        .award(ActionKind::Commit, &ctx_at(weekday_morning()))
        .unwrap();

    assert_eq!(result.class, "Debug Dragon");
    assert_eq!(manager.profile().unwrap().class, "Debug Dragon");
}

#[test]
fn test_even_history_selects_full_stack_druid() {
    let history = vec![
        CommitRecord::new("Add login page", &["web/login.tsx"]),
        CommitRecord::new("Add endpoint", &["src/api/users.rs"]),
        CommitRecord::new("Write docs", &["README.md"]),
        CommitRecord::new("Tune CI", &[".github/workflows/ci.yml"]),
    ];
    let (_home, manager) = manager_with_history(Some(history));

    let result = manager
        .award(ActionKind::Commit, &ctx_at(weekday_morning()))
        .unwrap();

    assert_eq!(result.class, "Full Stack Druid");
}

#[test]
fn test_idle_session_expires_with_summary() {
    let (_home, manager) = manager();
    let start = weekday_morning();
    manager.award(ActionKind::Commit, &ctx_at(start)).unwrap();
    manager.award(ActionKind::Push, &ctx_at(start)).unwrap();

    let still_active = utc(start) + ChronoDuration::minutes(10);
    assert!(manager.expire_session_if_idle(still_active).unwrap().is_none());

    let idle = utc(start) + ChronoDuration::minutes(31);
    let summary = manager
        .expire_session_if_idle(idle)
        .unwrap()
        .expect("session should expire");
    assert_eq!(summary.session_xp, 125);
    assert_eq!(summary.session_actions.commits, 1);
    assert_eq!(summary.session_actions.pushes, 1);

    let profile = manager.profile().unwrap();
    assert!(profile.session_start.is_none());
    assert_eq!(profile.session_xp, 0);
    assert_eq!(profile.total_xp, 125);

    let next = manager
        .award(ActionKind::Commit, &ctx_at(start + ChronoDuration::minutes(40)))
        .unwrap();
    assert!(next.session_started);
}

#[test]
fn test_summary_and_reset_keep_lifetime_stats() {
    let (_home, manager) = manager();
    let start = weekday_morning();
    manager.award(ActionKind::Deploy, &ctx_at(start)).unwrap();
    let later = start + ChronoDuration::minutes(5);
    manager.award(ActionKind::Push, &ctx_at(later)).unwrap();

    // The session ends at its last activity, not when the summary is asked for
    let summary = manager
        .summary(utc(later) + ChronoDuration::minutes(3))
        .unwrap()
        .expect("session is active");
    assert_eq!(summary.session_xp, 575);
    assert_eq!(summary.duration(), Duration::from_secs(5 * 60));
    assert!(manager.summary(utc(start)).unwrap().is_none());

    manager.award(ActionKind::Test, &ctx_at(start)).unwrap();
    manager.reset_session(utc(start)).unwrap();

    let profile = manager.profile().unwrap();
    assert!(profile.session_start.is_none());
    assert_eq!(profile.session_actions.total(), 0);
    assert_eq!(profile.stats.deploys, 1);
    assert_eq!(profile.stats.tests, 1);
    assert_eq!(profile.total_xp, 675);
}
