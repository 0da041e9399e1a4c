//! On-disk profile shape and reconciliation
//!
//! Profiles are read into a permissive shape where every field is optional,
//! then reconciled field by field into a complete [`Profile`]. Version 1
//! files (no `schemaVersion`) predate quest streaks; their missing fields
//! take the defaults below.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::profile::{
    ActionCounters, DEFAULT_CLASS, DEFAULT_USERNAME, Profile, QuestStreaks, SCHEMA_VERSION,
    UnlockedAchievement,
};
use crate::progress::apply_level;

const LEGACY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredProfile {
    schema_version: Option<u32>,
    username: Option<String>,
    class: Option<String>,
    // Derived from totalXp on load; read only so they are not kept as extras
    #[allow(dead_code)]
    level: Option<u32>,
    #[allow(dead_code)]
    xp: Option<u64>,
    total_xp: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    stats: Option<StoredCounters>,
    achievements: Option<Vec<UnlockedAchievement>>,
    quest_mode: Option<bool>,
    session_xp: Option<u64>,
    session_start: Option<DateTime<Utc>>,
    session_actions: Option<StoredCounters>,
    last_activity: Option<DateTime<Utc>>,
    streak_days: Option<u32>,
    last_streak_date: Option<NaiveDate>,
    streaks: Option<StoredStreaks>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoredCounters {
    commits: Option<u64>,
    tests: Option<u64>,
    deploys: Option<u64>,
    pushes: Option<u64>,
    merges: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredStreaks {
    quest_current: Option<u32>,
    quest_longest: Option<u32>,
    last_quest_day: Option<NaiveDate>,
    test_streak: Option<u32>,
}

impl StoredCounters {
    fn reconcile(self) -> ActionCounters {
        ActionCounters {
            commits: self.commits.unwrap_or(0),
            tests: self.tests.unwrap_or(0),
            deploys: self.deploys.unwrap_or(0),
            pushes: self.pushes.unwrap_or(0),
            merges: self.merges.unwrap_or(0),
        }
    }
}

impl StoredStreaks {
    fn reconcile(self) -> QuestStreaks {
        let quest_current = self.quest_current.unwrap_or(0);
        QuestStreaks {
            quest_current,
            quest_longest: self.quest_longest.unwrap_or(0).max(quest_current),
            last_quest_day: self.last_quest_day,
            test_streak: self.test_streak.unwrap_or(0),
        }
    }
}

impl StoredProfile {
    pub(crate) fn version(&self) -> u32 {
        self.schema_version.unwrap_or(LEGACY_SCHEMA_VERSION)
    }

    /// Build a complete profile. `now` stamps timestamps the file lacks.
    pub(crate) fn reconcile(self, now: DateTime<Utc>) -> Profile {
        let created_at = self.created_at.unwrap_or(now);

        let mut profile = Profile {
            schema_version: SCHEMA_VERSION,
            username: self.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            class: self
                .class
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CLASS.to_string()),
            level: 1,
            xp: 0,
            total_xp: self.total_xp.unwrap_or(0),
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
            stats: self.stats.map(StoredCounters::reconcile).unwrap_or_default(),
            achievements: dedup_achievements(self.achievements.unwrap_or_default()),
            quest_mode: self.quest_mode.unwrap_or(false),
            session_xp: self.session_xp.unwrap_or(0),
            session_start: self.session_start,
            session_actions: self
                .session_actions
                .map(StoredCounters::reconcile)
                .unwrap_or_default(),
            last_activity: self.last_activity,
            streak_days: self.streak_days.unwrap_or(0),
            last_streak_date: self.last_streak_date,
            streaks: self.streaks.map(StoredStreaks::reconcile).unwrap_or_default(),
            extra: self.extra,
        };

        if !profile.quest_mode {
            profile.streaks.test_streak = 0;
        }
        if profile.session_start.is_none() {
            profile.session_xp = 0;
            profile.session_actions = ActionCounters::default();
        }
        apply_level(&mut profile);
        profile
    }
}

/// Keep the first unlock of each id
fn dedup_achievements(achievements: Vec<UnlockedAchievement>) -> Vec<UnlockedAchievement> {
    let mut seen = std::collections::HashSet::new();
    achievements
        .into_iter()
        .filter(|a| seen.insert(a.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> Profile {
        let stored: StoredProfile = serde_json::from_str(json).unwrap();
        stored.reconcile(Utc::now())
    }

    #[test]
    fn test_legacy_profile_gains_new_fields() {
        let profile = load(
            r#"{
                "username": "ada",
                "class": "Test Cleric",
                "level": 2,
                "xp": 50,
                "totalXp": 150,
                "createdAt": "2025-01-01T10:00:00.000Z",
                "stats": { "commits": 1, "tests": 1 },
                "achievements": [{ "id": "First Blood", "unlockedAt": "2025-01-01T10:00:00.000Z" }],
                "sessionStart": null,
                "streakDays": 3,
                "lastStreakDate": "2025-01-03"
            }"#,
        );

        assert_eq!(profile.schema_version, SCHEMA_VERSION);
        assert_eq!(profile.username, "ada");
        assert_eq!(profile.class, "Test Cleric");
        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 50);
        assert_eq!(profile.stats.tests, 1);
        assert_eq!(profile.stats.deploys, 0);
        assert_eq!(profile.streak_days, 3);
        assert_eq!(profile.streaks, QuestStreaks::default());
        assert_eq!(profile.updated_at, profile.created_at);
        assert!(profile.extra.is_empty());
    }

    #[test]
    fn test_level_is_recomputed_from_total() {
        let profile = load(r#"{ "level": 9, "xp": 5, "totalXp": 120 }"#);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 20);
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let profile = load(r#"{ "totalXp": 10, "theme": "dnd", "prefs": { "sound": false } }"#);
        assert_eq!(profile.extra.get("theme"), Some(&Value::String("dnd".to_string())));
        assert!(profile.extra.contains_key("prefs"));
        assert!(!profile.extra.contains_key("totalXp"));
    }

    #[test]
    fn test_session_fields_cleared_without_session() {
        let profile = load(
            r#"{ "sessionStart": null, "sessionXp": 75, "sessionActions": { "pushes": 1 } }"#,
        );
        assert_eq!(profile.session_xp, 0);
        assert!(profile.session_actions.is_empty());
    }

    #[test]
    fn test_duplicate_achievements_are_dropped() {
        let profile = load(
            r#"{ "achievements": [
                { "id": "Century", "unlockedAt": "2025-01-01T10:00:00Z" },
                { "id": "Century", "unlockedAt": "2025-02-01T10:00:00Z" }
            ] }"#,
        );
        assert_eq!(profile.achievements.len(), 1);
        assert_eq!(profile.achievements[0].unlocked_at.to_rfc3339(), "2025-01-01T10:00:00+00:00");
    }

    #[test]
    fn test_empty_class_falls_back_to_default() {
        let profile = load(r#"{ "class": "" }"#);
        assert_eq!(profile.class, DEFAULT_CLASS);
    }
}
