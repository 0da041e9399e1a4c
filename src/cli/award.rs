//! `award` and `bonus` commands

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use devquest::manager::{ActionContext, AwardOutcome, QuestManager};

use super::{print_json, render};

/// Award XP for an action reported by a hook or script
pub fn award_command(
    manager: &QuestManager,
    repo: &Path,
    action: &str,
    message: Option<String>,
    elapsed_secs: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut ctx = ActionContext::new(repo);
    if let Some(message) = message {
        ctx = ctx.with_message(message);
    }
    if let Some(secs) = elapsed_secs {
        ctx = ctx.with_elapsed(Duration::from_secs(secs));
    }

    let outcome = manager.award_for_action(action, &ctx)?;
    report(&outcome, action, json)
}

/// Award a duration bonus for a stretch of focused work
pub fn bonus_command(
    manager: &QuestManager,
    repo: &Path,
    elapsed_secs: u64,
    json: bool,
) -> Result<()> {
    let ctx = ActionContext::new(repo).with_elapsed(Duration::from_secs(elapsed_secs));
    let outcome = manager.award_duration_bonus(&ctx)?;
    report(&outcome, "focus", json)
}

pub fn report(outcome: &AwardOutcome, label: &str, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }
    match outcome {
        AwardOutcome::Awarded(result) => render::award(result, label),
        AwardOutcome::Skipped { reason } => println!("No XP awarded: {}", reason),
    }
    Ok(())
}
