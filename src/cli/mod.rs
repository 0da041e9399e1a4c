//! CLI command implementations

pub mod award;
pub mod evolve;
pub mod init;
pub mod quest;
pub mod render;
pub mod session;
pub mod status;

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty JSON (for `--json`)
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
