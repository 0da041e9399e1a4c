//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock conditions. The
//! registry order is the evaluation order.

use chrono::{DateTime, Datelike, Local, Timelike, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::{ActionKind, Profile};

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstBlood,
    Century,
    TestBeliever,
    Deployer,
    NightOwl,
    EarlyBird,
    WeekendWarrior,
    Streak7,
    MarathonRunner,
    SteadyBuilder,
    BugHunter,
    InsaneInTheMembrane,
}

impl AchievementId {
    /// The identifier stored in the profile
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstBlood => "First Blood",
            Self::Century => "Century",
            Self::TestBeliever => "Test Believer",
            Self::Deployer => "Deployer",
            Self::NightOwl => "Night Owl",
            Self::EarlyBird => "Early Bird",
            Self::WeekendWarrior => "Weekend Warrior",
            Self::Streak7 => "Streak 7",
            Self::MarathonRunner => "Marathon Runner",
            Self::SteadyBuilder => "Steady Builder",
            Self::BugHunter => "Bug Hunter",
            Self::InsaneInTheMembrane => "Insane in the Membrane",
        }
    }

    /// Parse from the stored identifier
    pub fn from_str(s: &str) -> Option<Self> {
        ACHIEVEMENTS
            .iter()
            .map(|a| a.id)
            .find(|id| id.as_str() == s)
    }
}

/// Per-event data visible to achievement predicates
#[derive(Debug, Clone)]
pub struct EventContext<'a> {
    pub now: DateTime<Local>,
    /// `None` for bonus-only events
    pub action: Option<ActionKind>,
    pub commit_message: Option<&'a str>,
    pub duration_bonus: u64,
    pub quest_streak: u32,
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub description: &'static str,
    pub check: fn(&Profile, &EventContext<'_>) -> bool,
}

static BUG_FIX_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(fix|bug|issue|hotfix)").expect("valid bug-fix pattern"));

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstBlood,
        description: "Earn your first XP",
        check: |p, _| p.total_xp > 0,
    },
    Achievement {
        id: AchievementId::Century,
        description: "Reach 100 total XP",
        check: |p, _| p.total_xp >= 100,
    },
    Achievement {
        id: AchievementId::TestBeliever,
        description: "Run your test suite",
        check: |p, _| p.stats.tests >= 1,
    },
    Achievement {
        id: AchievementId::Deployer,
        description: "Ship a deployment",
        check: |p, _| p.stats.deploys >= 1,
    },
    Achievement {
        id: AchievementId::NightOwl,
        description: "Work between midnight and 5 AM",
        check: |_, ctx| ctx.now.hour() < 5,
    },
    Achievement {
        id: AchievementId::EarlyBird,
        description: "Work between 5 AM and 9 AM",
        check: |_, ctx| (5..9).contains(&ctx.now.hour()),
    },
    Achievement {
        id: AchievementId::WeekendWarrior,
        description: "Work on a weekend",
        check: |_, ctx| matches!(ctx.now.weekday(), Weekday::Sat | Weekday::Sun),
    },
    Achievement {
        id: AchievementId::Streak7,
        description: "Stay active 7 days in a row",
        check: |p, _| p.streak_days >= 7,
    },
    Achievement {
        id: AchievementId::MarathonRunner,
        description: "Earn the top duration bonus in one go",
        check: |_, ctx| ctx.duration_bonus >= 100,
    },
    Achievement {
        id: AchievementId::SteadyBuilder,
        description: "Keep a 7 day quest streak",
        check: |_, ctx| ctx.quest_streak >= 7,
    },
    Achievement {
        id: AchievementId::BugHunter,
        description: "Commit a bug fix",
        check: |_, ctx| {
            ctx.action == Some(ActionKind::Commit)
                && ctx
                    .commit_message
                    .is_some_and(|message| BUG_FIX_MESSAGE.is_match(message))
        },
    },
    Achievement {
        id: AchievementId::InsaneInTheMembrane,
        description: "Reach 10,000 total XP",
        check: |p, _| p.total_xp >= 10_000,
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static Achievement {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .expect("All achievements should be defined")
    }

    /// Look up a definition by its stored identifier
    pub fn lookup(id: &str) -> Option<&'static Achievement> {
        AchievementId::from_str(id).map(Self::get)
    }

    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}
