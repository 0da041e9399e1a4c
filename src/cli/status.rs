//! Status command implementation

use std::path::Path;

use anyhow::Result;
use chrono::{Local, Utc};

use devquest::achievements::Achievement;
use devquest::manager::QuestManager;

use super::{print_json, render};

/// Show the profile: class, level, streaks, session and achievements
pub fn status_command(manager: &QuestManager, repo: &Path, json: bool) -> Result<()> {
    let now = Utc::now();
    let report = manager.status(repo, now)?;
    if json {
        return print_json(&report);
    }

    let profile = &report.profile;
    let progress = report.progress;
    println!("{} the {}", profile.username, profile.class);
    println!(
        "Level {} {} {}/{} XP (total {})",
        progress.level,
        render::progress_bar(progress.xp, progress.xp_for_next(), 20),
        progress.xp,
        progress.xp_for_next(),
        profile.total_xp
    );
    println!("Daily streak: {} day(s)", profile.streak_days);
    println!("Quest Mode: {}", if profile.quest_mode { "ON" } else { "OFF" });
    if profile.quest_mode {
        println!(
            "Quest streak: {} (best {}) | Test streak: {}",
            profile.streaks.quest_current,
            profile.streaks.quest_longest,
            profile.streaks.test_streak
        );
    }

    if let Some(start) = profile.session_start {
        let age = (now - start).to_std().unwrap_or_default();
        println!(
            "Session: {} since {} | XP {}",
            render::format_duration(age),
            start.with_timezone(&Local).format("%H:%M"),
            profile.session_xp
        );
    }

    let stats = profile.stats;
    println!(
        "Commits {} | Pushes {} | Merges {} | Tests {} | Deploys {}",
        stats.commits, stats.pushes, stats.merges, stats.tests, stats.deploys
    );

    println!(
        "Achievements: {}/{}",
        profile.achievements.len(),
        Achievement::total_count()
    );
    for unlock in &profile.achievements {
        println!(
            "  {} ({})",
            unlock.id,
            unlock.unlocked_at.with_timezone(&Local).format("%Y-%m-%d")
        );
    }

    if !report.evolution_options.is_empty() {
        println!("Your class can evolve: {}", report.evolution_options.join(", "));
        println!("Run `devquest evolve \"<choice>\"` to ascend.");
    }

    Ok(())
}
