//! Award orchestration
//!
//! [`QuestManager`] is the only writer of the profile. Each call is one
//! load → compute → save sequence against the [`ProfileStore`]:
//!
//! ```text
//! action ──► load ──► session / XP / streaks ──► level
//!        ──► class ──► achievements ──► save
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let manager = QuestManager::from_config(home, &config)?;
//! let context = ActionContext::new(".").with_message("Fix crash");
//! let outcome = manager.award_for_action("commit", &context)?;
//! ```

mod outcome;
mod profile_ops;

pub use outcome::{ActionContext, AwardOutcome, AwardResult, QuestToggle, SkipReason, StatusReport};

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use crate::achievements::{EventContext, check_achievements, record_unlocks};
use crate::class::{CommitHistory, CompiledRules, GitLog, classify};
use crate::config::Config;
use crate::profile::{ActionKind, Profile, UnlockedAchievement};
use crate::progress::{
    SESSION_TIMEOUT, apply_level, duration_bonus, start_session_if_needed, update_quest_streak,
    update_streak, update_test_streak,
};
use crate::store::ProfileStore;

/// Coordinates profile updates for completed actions
pub struct QuestManager {
    store: ProfileStore,
    history: Box<dyn CommitHistory>,
    rules: CompiledRules,
    session_timeout: Duration,
}

impl QuestManager {
    /// Manager over `store` with default rules and `git log` history
    pub fn new(store: ProfileStore) -> Self {
        Self {
            store,
            history: Box::new(GitLog),
            rules: CompiledRules::default(),
            session_timeout: SESSION_TIMEOUT,
        }
    }

    /// Manager for a store directory, configured from its `config.toml`
    pub fn from_config(home: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let rules = config
            .classifier
            .compile()
            .context("Invalid keyword pattern in [classifier] config")?;
        let store = ProfileStore::with_lock_settings(home, config.lock.clone());
        Ok(Self::new(store)
            .with_rules(rules)
            .with_session_timeout(config.session.timeout()))
    }

    pub fn with_history(mut self, history: impl CommitHistory + 'static) -> Self {
        self.history = Box::new(history);
        self
    }

    pub fn with_rules(mut self, rules: CompiledRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Award an action by name. Unknown names are a no-op.
    pub fn award_for_action(&self, action: &str, ctx: &ActionContext) -> Result<AwardOutcome> {
        match ActionKind::from_name(action) {
            Some(kind) => self.award(kind, ctx).map(AwardOutcome::Awarded),
            None => {
                debug!(action, "No XP for unknown action");
                Ok(AwardOutcome::Skipped {
                    reason: SkipReason::UnknownAction(action.to_string()),
                })
            }
        }
    }

    /// Award a successful action
    pub fn award(&self, action: ActionKind, ctx: &ActionContext) -> Result<AwardResult> {
        let mut profile = self.store.load().context("Failed to load profile")?;
        let now = ctx.now.with_timezone(&Utc);
        let today = ctx.now.date_naive();

        let session_started = start_session_if_needed(&mut profile, now);
        let previous_level = profile.level;

        let base_xp = action.xp();
        profile.add_xp(base_xp);
        profile.record_action(action);
        profile.touch(now);

        update_streak(&mut profile, today);
        update_quest_streak(&mut profile, today);
        update_test_streak(&mut profile, action);

        let bonus = self.quest_bonus(&profile, ctx.elapsed);
        profile.add_xp(bonus);

        let progress = apply_level(&mut profile);
        self.reclassify(&mut profile, &ctx.repo_path);

        let event = EventContext {
            now: ctx.now,
            action: Some(action),
            commit_message: ctx.commit_message.as_deref(),
            duration_bonus: bonus,
            quest_streak: profile.streaks.quest_current,
        };
        let unlocked = unlock_achievements(&mut profile, &event, bonus);

        self.store.save(&profile).context("Failed to save profile")?;

        info!(
            action = %action,
            xp = base_xp,
            bonus,
            level = progress.level,
            unlocked = unlocked.len(),
            "Awarded XP"
        );
        Ok(AwardResult::new(
            &profile,
            progress,
            previous_level,
            session_started,
            base_xp,
            bonus,
            unlocked,
        ))
    }

    /// Award only the duration bonus (idle-time rewards).
    ///
    /// Skipped when quest mode is off, no elapsed time is known, or the
    /// elapsed time is below the first bonus tier.
    pub fn award_duration_bonus(&self, ctx: &ActionContext) -> Result<AwardOutcome> {
        let mut profile = self.store.load().context("Failed to load profile")?;
        if !profile.quest_mode {
            return Ok(skipped(SkipReason::QuestModeOff));
        }
        let Some(elapsed) = ctx.elapsed else {
            return Ok(skipped(SkipReason::NoElapsedTime));
        };
        let bonus = duration_bonus(elapsed);
        if bonus == 0 {
            return Ok(skipped(SkipReason::NoBonus));
        }

        let now = ctx.now.with_timezone(&Utc);
        let session_started = start_session_if_needed(&mut profile, now);
        let previous_level = profile.level;

        profile.add_xp(bonus);
        profile.touch(now);
        update_quest_streak(&mut profile, ctx.now.date_naive());

        let progress = apply_level(&mut profile);
        let event = EventContext {
            now: ctx.now,
            action: None,
            commit_message: None,
            duration_bonus: bonus,
            quest_streak: profile.streaks.quest_current,
        };
        let unlocked = unlock_achievements(&mut profile, &event, bonus);

        self.store.save(&profile).context("Failed to save profile")?;

        info!(bonus, level = progress.level, "Awarded duration bonus");
        Ok(AwardOutcome::Awarded(AwardResult::new(
            &profile,
            progress,
            previous_level,
            session_started,
            0,
            bonus,
            unlocked,
        )))
    }

    fn quest_bonus(&self, profile: &Profile, elapsed: Option<Duration>) -> u64 {
        match elapsed {
            Some(elapsed) if profile.quest_mode => duration_bonus(elapsed),
            _ => 0,
        }
    }

    /// Re-derive the class from history; unavailable history keeps it
    fn reclassify(&self, profile: &mut Profile, repo: &Path) {
        let commits = self.history.commits(repo);
        if commits.is_none() {
            debug!(repo = %repo.display(), "No commit history, keeping class {}", profile.class);
        }
        profile.class = classify(&profile.class, &profile.stats, commits.as_deref(), &self.rules);
    }
}

fn skipped(reason: SkipReason) -> AwardOutcome {
    AwardOutcome::Skipped { reason }
}

/// Evaluate achievements against the profile without `bonus`, then record
/// the unlocks on the real profile
fn unlock_achievements(
    profile: &mut Profile,
    event: &EventContext<'_>,
    bonus: u64,
) -> Vec<UnlockedAchievement> {
    let mut snapshot = profile.clone();
    snapshot.total_xp -= bonus;
    snapshot.session_xp = snapshot.session_xp.saturating_sub(bonus);
    apply_level(&mut snapshot);

    let unlocked = check_achievements(&snapshot, event);
    record_unlocks(profile, &unlocked);
    unlocked
}
