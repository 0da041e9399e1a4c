//! DevQuest - XP for the work you already do
//!
//! DevQuest wraps everyday developer commands (commits, pushes, merges, test
//! runs, deploys). When a wrapped command succeeds it awards experience,
//! tracks levels, streaks and work sessions, unlocks achievements, and
//! infers a "class" from the repository's commit history.
//!
//! ## Layout
//!
//! - [`progress`]: leveling curve, day streaks, work sessions
//! - [`achievements`]: achievement registry and evaluation
//! - [`class`]: class inference from commit history
//! - [`store`]: crash-safe, locked profile persistence
//! - [`manager`]: the award orchestrator tying it together
//!
//! Rendering and process spawning live in the `devquest` binary.

pub mod achievements;
mod atomic;
pub mod class;
pub mod config;
pub mod error;
pub mod manager;
pub mod profile;
pub mod progress;
pub mod store;

pub use config::Config;
pub use error::StoreError;
pub use manager::{ActionContext, AwardOutcome, AwardResult, QuestManager};
pub use profile::{ActionKind, Profile};
pub use store::ProfileStore;
