//! Progression: levels, streaks and work sessions

mod levels;
mod session;
mod streaks;

pub use levels::{LevelProgress, apply_level, total_for_level, xp_required_for_level};
pub use session::{
    SESSION_TIMEOUT, SessionSummary, end_session, is_session_expired, session_summary,
    start_session_if_needed,
};
pub use streaks::{
    duration_bonus, reset_test_streak, update_quest_streak, update_streak, update_test_streak,
};
