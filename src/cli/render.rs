//! Plain-text rendering of award results and summaries

use std::time::Duration;

use devquest::achievements::Achievement;
use devquest::manager::AwardResult;
use devquest::profile::UnlockedAchievement;
use devquest::progress::SessionSummary;

const BAR_WIDTH: usize = 20;

pub fn progress_bar(current: u64, max: u64, width: usize) -> String {
    let ratio = if max == 0 {
        0.0
    } else {
        (current as f64 / max as f64).min(1.0)
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `0m`, `42m`, `1h 5m`
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.as_secs() / 60;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn achievement(unlock: &UnlockedAchievement) {
    match Achievement::lookup(&unlock.id) {
        Some(def) => println!("Achievement unlocked: {} - {}", unlock.id, def.description),
        None => println!("Achievement unlocked: {}", unlock.id),
    }
}

pub fn award(result: &AwardResult, label: &str) {
    if result.session_started {
        println!("A new quest begins.");
    }
    if result.xp > 0 {
        println!("+{} XP ({} completed)", result.xp, label);
    }
    if result.duration_bonus > 0 {
        println!("+{} XP duration bonus", result.duration_bonus);
    }
    if result.leveled_up() {
        println!("Level up! You are now level {}.", result.level);
    }
    for unlock in &result.achievements {
        achievement(unlock);
    }
    println!(
        "Level {} {} {}/{} XP",
        result.level,
        progress_bar(result.current_xp, result.xp_to_next, BAR_WIDTH),
        result.current_xp,
        result.xp_to_next
    );
}

pub fn session_summary(summary: Option<&SessionSummary>) {
    let Some(summary) = summary else {
        println!("No active session.");
        return;
    };
    let actions = summary.session_actions;
    println!("Session summary ({})", format_duration(summary.duration()));
    println!("  XP earned: {}", summary.session_xp);
    println!(
        "  Commits {} | Pushes {} | Merges {} | Tests {} | Deploys {}",
        actions.commits, actions.pushes, actions.merges, actions.tests, actions.deploys
    );
}
