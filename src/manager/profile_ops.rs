//! Session, quest-mode and class operations outside of awards

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{QuestManager, QuestToggle, StatusReport};
use crate::class::{EVOLUTION_LEVEL, evolution_options, evolve, is_evolved};
use crate::profile::Profile;
use crate::progress::{
    LevelProgress, SessionSummary, end_session, is_session_expired, reset_test_streak,
    session_summary, start_session_if_needed,
};

impl QuestManager {
    /// Current profile, without modifying it
    pub fn profile(&self) -> Result<Profile> {
        self.store.load().context("Failed to load profile")
    }

    fn save(&self, profile: &mut Profile, now: DateTime<Utc>) -> Result<()> {
        profile.updated_at = now;
        self.store.save(profile).context("Failed to save profile")
    }

    /// Refresh the class from `repo` and report the profile
    pub fn status(&self, repo: &Path, now: DateTime<Utc>) -> Result<StatusReport> {
        let mut profile = self.profile()?;
        self.reclassify(&mut profile, repo);
        self.save(&mut profile, now)?;

        Ok(StatusReport {
            progress: LevelProgress::from_total(profile.total_xp),
            evolution_options: evolution_options(&profile),
            profile,
        })
    }

    /// Close the active session and return its summary
    pub fn summary(&self, now: DateTime<Utc>) -> Result<Option<SessionSummary>> {
        let mut profile = self.profile()?;
        let summary = session_summary(&profile, now);
        if summary.is_some() {
            end_session(&mut profile);
            self.save(&mut profile, now)?;
        }
        Ok(summary)
    }

    /// Clear session fields; lifetime stats are untouched
    pub fn reset_session(&self, now: DateTime<Utc>) -> Result<()> {
        let mut profile = self.profile()?;
        end_session(&mut profile);
        self.save(&mut profile, now)
    }

    /// End the session if it has been idle longer than the timeout.
    ///
    /// Meant to be polled at the start of every invocation.
    pub fn expire_session_if_idle(&self, now: DateTime<Utc>) -> Result<Option<SessionSummary>> {
        let mut profile = self.profile()?;
        if !is_session_expired(&profile, now, self.session_timeout) {
            return Ok(None);
        }
        let summary = session_summary(&profile, now);
        end_session(&mut profile);
        self.save(&mut profile, now)?;
        info!("Session expired after inactivity");
        Ok(summary)
    }

    pub fn quest_on(&self, now: DateTime<Utc>) -> Result<QuestToggle> {
        let mut profile = self.profile()?;
        if profile.quest_mode {
            return Ok(QuestToggle::Unchanged);
        }
        profile.quest_mode = true;
        let session_started = start_session_if_needed(&mut profile, now);
        self.save(&mut profile, now)?;
        Ok(QuestToggle::Engaged { session_started })
    }

    /// Disable quest mode, resetting the test streak and closing the session
    pub fn quest_off(&self, now: DateTime<Utc>) -> Result<QuestToggle> {
        let mut profile = self.profile()?;
        if !profile.quest_mode {
            return Ok(QuestToggle::Unchanged);
        }
        profile.quest_mode = false;
        reset_test_streak(&mut profile);
        let summary = session_summary(&profile, now);
        end_session(&mut profile);
        self.save(&mut profile, now)?;
        Ok(QuestToggle::Disengaged { summary })
    }

    /// Switch to an ascended class variant
    pub fn evolve(&self, choice: &str, now: DateTime<Utc>) -> Result<String> {
        let mut profile = self.profile()?;
        if !evolve(&mut profile, choice) {
            let options = evolution_options(&profile);
            if is_evolved(&profile.class) {
                bail!("{} has already evolved", profile.class);
            }
            if options.is_empty() {
                bail!("Class evolution unlocks at level {}", EVOLUTION_LEVEL);
            }
            bail!("'{}' is not an option; choose one of: {}", choice, options.join(", "));
        }
        self.save(&mut profile, now)?;
        Ok(profile.class)
    }
}
