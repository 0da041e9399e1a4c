//! XP and Level system
//!
//! Levels follow a closed-form curve: reaching level `n + 1` from level `n`
//! costs `floor(100 * n^1.5)` experience.

use serde::Serialize;

use crate::profile::Profile;

/// Experience needed to advance from `level` to `level + 1`.
///
/// Computed as `isqrt(10_000 * level^3)`, which equals `floor(100 * level^1.5)`
/// without floating-point rounding.
pub fn xp_required_for_level(level: u32) -> u64 {
    let level = u128::from(level.max(1));
    let exact = (10_000 * level * level * level).isqrt();
    u64::try_from(exact).unwrap_or(u64::MAX)
}

/// Cumulative experience needed to reach `level` from a fresh profile
pub fn total_for_level(level: u32) -> u64 {
    (1..level.max(1)).map(xp_required_for_level).sum()
}

/// Level plus experience within that level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u64,
}

impl LevelProgress {
    /// Resolve the level reached with `total_xp` lifetime experience
    pub fn from_total(total_xp: u64) -> Self {
        let mut level = 1;
        let mut remaining = total_xp;
        loop {
            let required = xp_required_for_level(level);
            if remaining < required {
                break;
            }
            remaining -= required;
            level += 1;
        }
        Self {
            level,
            xp: remaining,
        }
    }

    /// Size of the current level
    pub fn xp_for_next(&self) -> u64 {
        xp_required_for_level(self.level)
    }

    /// Experience still missing to level up
    pub fn remaining(&self) -> u64 {
        self.xp_for_next().saturating_sub(self.xp)
    }

    /// Progress through the current level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        let size = self.xp_for_next();
        if size == 0 {
            1.0
        } else {
            self.xp as f32 / size as f32
        }
    }
}

/// Recompute `level` and `xp` from `total_xp`. Returns the new progress.
pub fn apply_level(profile: &mut Profile) -> LevelProgress {
    let progress = LevelProgress::from_total(profile.total_xp);
    profile.level = progress.level;
    profile.xp = progress.xp;
    progress
}
