use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use devquest::{Config, QuestManager};

mod cli;

use cli::quest::QuestCommands;

#[derive(Parser)]
#[command(name = "devquest")]
#[command(about = "Earn XP, levels and achievements for everyday development work")]
#[command(version)]
struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short = 'p', long = "repo", visible_alias = "path", global = true)]
    repo: Option<PathBuf>,

    /// Store directory (defaults to $DEVQUEST_HOME or ~/.devquest)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text; an expired session is
    /// reported as a separate document first
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Award XP for a completed action (commit, push, test, deploy, merge)
    Award {
        action: String,

        /// Commit message, checked for bug-fix keywords
        #[arg(short, long)]
        message: Option<String>,

        /// How long the action took; earns a bonus in quest mode
        #[arg(long)]
        elapsed_secs: Option<u64>,
    },

    /// Award a quest-mode duration bonus for focused work
    Bonus {
        #[arg(long)]
        elapsed_secs: u64,
    },

    /// Show level, class, streaks and achievements
    Status,

    /// Show the session summary and end the session
    Summary,

    /// Reset the current session
    Reset,

    /// Toggle or inspect quest mode
    Quest {
        #[command(subcommand)]
        command: Option<QuestCommands>,
    },

    /// List class evolutions, or evolve into one
    Evolve { choice: Option<String> },

    /// Write a default config.toml into the store directory
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let home = cli.home.unwrap_or_else(Config::default_home);
    let repo = cli.repo.unwrap_or_else(|| PathBuf::from("."));
    let json = cli.json;
    let command = cli.command.unwrap_or(Commands::Status);

    if let Commands::Init { force } = command {
        return cli::init::init_command(&home, force);
    }

    let config = Config::load(&home)?;
    let manager = QuestManager::from_config(&home, &config)?;

    if let Some(summary) = manager.expire_session_if_idle(Utc::now())? {
        cli::session::expired_notice(&summary, json)?;
    }

    match command {
        Commands::Award {
            action,
            message,
            elapsed_secs,
        } => {
            cli::award::award_command(&manager, &repo, &action, message, elapsed_secs, json)?;
        }
        Commands::Bonus { elapsed_secs } => {
            cli::award::bonus_command(&manager, &repo, elapsed_secs, json)?;
        }
        Commands::Status => {
            cli::status::status_command(&manager, &repo, json)?;
        }
        Commands::Summary => {
            cli::session::summary_command(&manager, json)?;
        }
        Commands::Reset => {
            cli::session::reset_command(&manager)?;
        }
        Commands::Quest { command } => {
            let command = command.unwrap_or(QuestCommands::Status);
            cli::quest::quest_command(&manager, command, json)?;
        }
        Commands::Evolve { choice } => {
            cli::evolve::evolve_command(&manager, choice)?;
        }
        Commands::Init { .. } => unreachable!("handled before loading the profile"),
    }

    Ok(())
}
