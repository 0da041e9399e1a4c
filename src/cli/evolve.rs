//! Class evolution command

use anyhow::Result;
use chrono::Utc;

use devquest::class::{EVOLUTION_LEVEL, evolution_options, is_evolved};
use devquest::manager::QuestManager;

/// List evolution options, or evolve into `choice`
pub fn evolve_command(manager: &QuestManager, choice: Option<String>) -> Result<()> {
    let Some(choice) = choice else {
        let profile = manager.profile()?;
        let options = evolution_options(&profile);
        if is_evolved(&profile.class) {
            println!("{} has already evolved.", profile.class);
        } else if options.is_empty() {
            println!(
                "Level {}/{}: evolution is not available yet.",
                profile.level, EVOLUTION_LEVEL
            );
        } else {
            println!("Choose your path:");
            for option in options {
                println!("  {}", option);
            }
        }
        return Ok(());
    };

    let class = manager.evolve(&choice, Utc::now())?;
    println!("You have ascended: {}", class);
    Ok(())
}
