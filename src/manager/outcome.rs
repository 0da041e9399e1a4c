//! Results handed to the presentation layer

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::profile::{Profile, UnlockedAchievement};
use crate::progress::{LevelProgress, SessionSummary};

/// A completed action as reported by the wrapper
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub now: DateTime<Local>,
    /// Commit message, used for bug-fix detection on commits
    pub commit_message: Option<String>,
    /// Repository whose history drives class detection
    pub repo_path: PathBuf,
    /// How long the wrapped command (or idle stretch) took
    pub elapsed: Option<Duration>,
}

impl ActionContext {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            now: Local::now(),
            commit_message: None,
            repo_path: repo_path.into(),
            elapsed: None,
        }
    }

    pub fn at(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }
}

/// Why nothing was awarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "kebab-case")]
pub enum SkipReason {
    UnknownAction(String),
    QuestModeOff,
    NoElapsedTime,
    NoBonus,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction(action) => write!(f, "no XP for '{}'", action),
            Self::QuestModeOff => f.write_str("quest mode is off"),
            Self::NoElapsedTime => f.write_str("no elapsed time given"),
            Self::NoBonus => f.write_str("too short for a duration bonus"),
        }
    }
}

/// Everything a renderer needs after an award
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardResult {
    pub session_started: bool,
    /// Base XP of the action (0 for bonus-only awards)
    pub xp: u64,
    pub duration_bonus: u64,
    pub level: u32,
    pub previous_level: u32,
    /// XP within the current level
    pub current_xp: u64,
    /// Size of the current level
    pub xp_to_next: u64,
    /// XP still missing to level up
    pub xp_remaining: u64,
    pub total_xp: u64,
    pub achievements: Vec<UnlockedAchievement>,
    pub streak_days: u32,
    pub quest_streak: u32,
    pub quest_longest: u32,
    pub test_streak: u32,
    pub class: String,
}

impl AwardResult {
    pub(crate) fn new(
        profile: &Profile,
        progress: LevelProgress,
        previous_level: u32,
        session_started: bool,
        xp: u64,
        duration_bonus: u64,
        achievements: Vec<UnlockedAchievement>,
    ) -> Self {
        Self {
            session_started,
            xp,
            duration_bonus,
            level: progress.level,
            previous_level,
            current_xp: progress.xp,
            xp_to_next: progress.xp_for_next(),
            xp_remaining: progress.remaining(),
            total_xp: profile.total_xp,
            achievements,
            streak_days: profile.streak_days,
            quest_streak: profile.streaks.quest_current,
            quest_longest: profile.streaks.quest_longest,
            test_streak: profile.streaks.test_streak,
            class: profile.class.clone(),
        }
    }

    pub fn leveled_up(&self) -> bool {
        self.level > self.previous_level
    }

    pub fn total_awarded(&self) -> u64 {
        self.xp + self.duration_bonus
    }
}

/// Outcome of an award request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum AwardOutcome {
    Awarded(AwardResult),
    Skipped { reason: SkipReason },
}

impl AwardOutcome {
    pub fn awarded(&self) -> Option<&AwardResult> {
        match self {
            Self::Awarded(result) => Some(result),
            Self::Skipped { .. } => None,
        }
    }
}

/// Result of toggling quest mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum QuestToggle {
    /// Already in the requested state
    Unchanged,
    Engaged { session_started: bool },
    /// Quest mode off; carries the session that was closed, if any
    Disengaged { summary: Option<SessionSummary> },
}

/// Profile overview for `status`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub profile: Profile,
    pub progress: LevelProgress,
    pub evolution_options: Vec<String>,
}
