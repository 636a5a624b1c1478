use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{prelude::*, EnvFilter};

use xbox_exe::commands::{
    find_command, init_policy_command, list_games_command, rollback_command, scan_command,
};
use xbox_exe_core::config::{DEFAULT_POLICY_FILE, PACKAGE_REPOSITORY_ROOT};
use xbox_exe_core::RunConfig;

/// Locate and rename executables of locally installed packaged games.
///
/// This CLI is a thin wrapper around `xbox-exe-core` (exposed in code as
/// `xbox_exe_core`). Running it without a subcommand performs a full `scan`.
#[derive(Parser, Debug)]
#[command(
    name = "xbox-exe",
    version,
    about = "Locate and rename executables of installed packaged games",
    long_about = None
)]
struct Cli {
    /// Rename policy document (JSON).
    #[arg(long, global = true, default_value = DEFAULT_POLICY_FILE)]
    policy: PathBuf,

    /// Registry key (under HKEY_LOCAL_MACHINE) to enumerate packages under.
    #[arg(long, global = true, default_value = PACKAGE_REPOSITORY_ROOT)]
    registry_base: String,

    /// Read packages from a JSON registry snapshot instead of the system registry.
    #[arg(long, global = true)]
    registry_snapshot: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover installs, locate and rename executables per the policy, save the outcome.
    ///
    /// If the policy document is missing or unusable, a default one is written and a
    /// built-in list is used for this run.
    Scan,

    /// List discovered installs without scanning their directories.
    List {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Report files whose name contains PATTERN under any install. Renames nothing.
    Find {
        /// Case-sensitive substring of the file name.
        pattern: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the default policy document.
    InitPolicy {
        /// Overwrite an existing policy document.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Undo the renames recorded in the policy document by a previous scan.
    Rollback,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = RunConfig {
        policy_path: cli.policy,
        registry_base: cli.registry_base,
        registry_snapshot: cli.registry_snapshot,
    };

    match cli.command.unwrap_or(Command::Scan) {
        Command::Scan => scan_command(&config)?,
        Command::List { json } => list_games_command(&config, json)?,
        Command::Find { pattern, json } => find_command(&config, &pattern, json)?,
        Command::InitPolicy { force } => init_policy_command(&config.policy_path, force)?,
        Command::Rollback => rollback_command(&config)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer =
        tracing_subscriber::fmt::layer().with_target(false).compact().with_writer(std::io::stderr);

    tracing_subscriber::registry().with(env_filter).with(stderr_layer).init();
}
