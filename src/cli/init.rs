//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;

use devquest::Config;

/// Write a `config.toml` with all defaults spelled out
pub fn init_command(home: &Path, force: bool) -> Result<()> {
    let config_path = Config::path_in(home);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::default().save_to_file(&config_path)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
