//! Session CLI commands: summary and reset

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use devquest::manager::QuestManager;
use devquest::progress::SessionSummary;

use super::{print_json, render};

/// JSON document for a session that timed out between invocations
#[derive(Debug, Serialize)]
struct ExpiredSession<'a> {
    event: &'static str,
    summary: &'a SessionSummary,
}

impl<'a> ExpiredSession<'a> {
    fn new(summary: &'a SessionSummary) -> Self {
        Self {
            event: "session-expired",
            summary,
        }
    }
}

/// Report a session that ended from inactivity. In JSON mode this is its own
/// document, printed before the command's output.
pub fn expired_notice(summary: &SessionSummary, json: bool) -> Result<()> {
    if json {
        return print_json(&ExpiredSession::new(summary));
    }
    println!("Your last session ended after inactivity.");
    render::session_summary(Some(summary));
    Ok(())
}

/// Print the session summary and close the session
pub fn summary_command(manager: &QuestManager, json: bool) -> Result<()> {
    let summary = manager.summary(Utc::now())?;
    if json {
        return print_json(&summary);
    }
    render::session_summary(summary.as_ref());
    Ok(())
}

pub fn reset_command(manager: &QuestManager) -> Result<()> {
    manager.reset_session(Utc::now())?;
    println!("Session reset.");
    Ok(())
}
