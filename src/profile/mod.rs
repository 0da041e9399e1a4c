//! Profile data model
//!
//! The profile is the single persisted record of a user's progression. It is
//! stored as camelCase JSON so profiles written by earlier releases load
//! without conversion.

mod action;

pub use action::ActionKind;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema version written by this release
pub const SCHEMA_VERSION: u32 = 2;

pub const DEFAULT_USERNAME: &str = "adventurer";
pub const DEFAULT_CLASS: &str = "Adventurer";

/// Per-action counters, used both for lifetime stats and the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounters {
    pub commits: u64,
    pub tests: u64,
    pub deploys: u64,
    pub pushes: u64,
    pub merges: u64,
}

impl ActionCounters {
    pub fn increment(&mut self, action: ActionKind) {
        *self.slot(action) += 1;
    }

    pub fn get(&self, action: ActionKind) -> u64 {
        match action {
            ActionKind::Commit => self.commits,
            ActionKind::Push => self.pushes,
            ActionKind::Test => self.tests,
            ActionKind::Deploy => self.deploys,
            ActionKind::Merge => self.merges,
        }
    }

    /// Sum over all five action kinds
    pub fn total(&self) -> u64 {
        self.commits + self.tests + self.deploys + self.pushes + self.merges
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn slot(&mut self, action: ActionKind) -> &mut u64 {
        match action {
            ActionKind::Commit => &mut self.commits,
            ActionKind::Push => &mut self.pushes,
            ActionKind::Test => &mut self.tests,
            ActionKind::Deploy => &mut self.deploys,
            ActionKind::Merge => &mut self.merges,
        }
    }
}

/// Quest-mode streaks (only advance while quest mode is on)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStreaks {
    pub quest_current: u32,
    pub quest_longest: u32,
    pub last_quest_day: Option<NaiveDate>,
    /// Consecutive test runs
    pub test_streak: u32,
}

/// An unlocked achievement as stored in the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// The persisted progression state of a single user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub schema_version: u32,
    pub username: String,
    pub class: String,
    pub level: u32,
    /// Experience within the current level
    pub xp: u64,
    pub total_xp: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stats: ActionCounters,
    pub achievements: Vec<UnlockedAchievement>,
    pub quest_mode: bool,
    pub session_xp: u64,
    pub session_start: Option<DateTime<Utc>>,
    pub session_actions: ActionCounters,
    pub last_activity: Option<DateTime<Utc>>,
    pub streak_days: u32,
    pub last_streak_date: Option<NaiveDate>,
    pub streaks: QuestStreaks,
    /// Keys this release does not know about, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// A fresh level-1 profile created at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            username: DEFAULT_USERNAME.to_string(),
            class: DEFAULT_CLASS.to_string(),
            level: 1,
            xp: 0,
            total_xp: 0,
            created_at: now,
            updated_at: now,
            stats: ActionCounters::default(),
            achievements: Vec::new(),
            quest_mode: false,
            session_xp: 0,
            session_start: None,
            session_actions: ActionCounters::default(),
            last_activity: None,
            streak_days: 0,
            last_streak_date: None,
            streaks: QuestStreaks::default(),
            extra: Map::new(),
        }
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    pub fn session_active(&self) -> bool {
        self.session_start.is_some()
    }

    /// Add experience to both the lifetime and session totals.
    ///
    /// Level and in-level experience are not touched; call
    /// `progress::apply_level` afterwards.
    pub fn add_xp(&mut self, amount: u64) {
        self.total_xp += amount;
        self.session_xp += amount;
    }

    pub fn record_action(&mut self, action: ActionKind) {
        self.stats.increment(action);
        self.session_actions.increment(action);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.last_activity = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_track_each_action() {
        let mut counters = ActionCounters::default();
        counters.increment(ActionKind::Commit);
        counters.increment(ActionKind::Commit);
        counters.increment(ActionKind::Deploy);

        assert_eq!(counters.get(ActionKind::Commit), 2);
        assert_eq!(counters.get(ActionKind::Deploy), 1);
        assert_eq!(counters.get(ActionKind::Test), 0);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = Profile::new(Utc::now());
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["totalXp"], 0);
        assert_eq!(json["questMode"], false);
        assert!(json["sessionStart"].is_null());
        assert_eq!(json["streaks"]["testStreak"], 0);
        assert_eq!(json["stats"]["commits"], 0);
    }

    #[test]
    fn test_extra_keys_are_flattened() {
        let mut profile = Profile::new(Utc::now());
        profile
            .extra
            .insert("theme".to_string(), Value::String("dnd".to_string()));
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["theme"], "dnd");
    }
}
