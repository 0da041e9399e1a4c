//! Work sessions
//!
//! A session opens with the first rewarded action and closes on an explicit
//! summary/reset or after a period of inactivity. Expiry is polled by the
//! caller at the start of each invocation; nothing here runs in the background.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::profile::{ActionCounters, Profile};

/// Default inactivity window after which a session is considered over
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Snapshot of a session for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub session_xp: u64,
    pub session_actions: ActionCounters,
}

impl SessionSummary {
    pub fn duration(&self) -> Duration {
        (self.end - self.start).to_std().unwrap_or_default()
    }
}

/// Open a session unless one is active. Returns whether a session started.
pub fn start_session_if_needed(profile: &mut Profile, now: DateTime<Utc>) -> bool {
    if profile.session_active() {
        return false;
    }
    profile.session_start = Some(now);
    profile.session_xp = 0;
    profile.session_actions = ActionCounters::default();
    true
}

/// True if a session is active and idle for longer than `timeout`
pub fn is_session_expired(profile: &Profile, now: DateTime<Utc>, timeout: Duration) -> bool {
    let (Some(_), Some(last_activity)) = (profile.session_start, profile.last_activity) else {
        return false;
    };
    (now - last_activity)
        .to_std()
        .map(|idle| idle > timeout)
        .unwrap_or(false)
}

pub fn end_session(profile: &mut Profile) {
    profile.session_start = None;
    profile.session_xp = 0;
    profile.session_actions = ActionCounters::default();
}

/// Summary of the active session, ending at the last activity (or `now`)
pub fn session_summary(profile: &Profile, now: DateTime<Utc>) -> Option<SessionSummary> {
    let start = profile.session_start?;
    Some(SessionSummary {
        start,
        end: profile.last_activity.unwrap_or(now),
        session_xp: profile.session_xp,
        session_actions: profile.session_actions,
    })
}
