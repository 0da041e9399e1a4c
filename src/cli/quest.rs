//! Quest mode commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use devquest::manager::{QuestManager, QuestToggle};

use super::{print_json, render};

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum QuestCommands {
    /// Enable quest mode (duration bonuses, quest and test streaks)
    On,
    /// Disable quest mode and close the current session
    Off,
    /// Show quest mode state
    Status,
}

pub fn quest_command(manager: &QuestManager, command: QuestCommands, json: bool) -> Result<()> {
    let now = Utc::now();
    match command {
        QuestCommands::Status => {
            let profile = manager.profile()?;
            if json {
                return print_json(&serde_json::json!({
                    "questMode": profile.quest_mode,
                    "streaks": profile.streaks,
                    "sessionStart": profile.session_start,
                    "sessionXp": profile.session_xp,
                }));
            }
            println!("Quest Mode: {}", if profile.quest_mode { "ON" } else { "OFF" });
            println!("Class: {}", profile.class);
            println!("Level: {}", profile.level);
            println!("Total XP: {}", profile.total_xp);
            if let Some(start) = profile.session_start {
                let age = (now - start).to_std().unwrap_or_default();
                println!("Session: {} · XP {}", render::format_duration(age), profile.session_xp);
            }
        }
        QuestCommands::On => {
            let toggle = manager.quest_on(now)?;
            if json {
                return print_json(&toggle);
            }
            match toggle {
                QuestToggle::Unchanged => println!("Quest Mode already engaged"),
                _ => println!("Quest Mode engaged."),
            }
        }
        QuestCommands::Off => {
            let toggle = manager.quest_off(now)?;
            if json {
                return print_json(&toggle);
            }
            match toggle {
                QuestToggle::Disengaged { summary } => {
                    if summary.is_some() {
                        render::session_summary(summary.as_ref());
                    }
                    println!("Quest Mode disengaged.");
                }
                _ => println!("Quest Mode already disengaged"),
            }
        }
    }
    Ok(())
}
