//! Gamification system: achievement registry and evaluation

mod checker;
mod definitions;

pub use checker::{check_achievements, record_unlocks};
pub use definitions::{ACHIEVEMENTS, Achievement, AchievementId, EventContext};
