use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::warn;

use xbox_exe_core::{
    policy, BinaryInfo, GameCatalog, GameExecutableInfo, GameInstallInfo, GameRegistryInfo,
    RunConfig,
};

use crate::canonicalize_or_current;

/// Serializable view of a catalog entry, including its derived full path.
#[derive(Debug, Serialize)]
pub struct GameSnapshot<'a> {
    pub game_key: &'a str,
    pub drive: &'a str,
    pub directory: &'a str,
    pub folder: &'a str,
    pub install_path: &'a str,
    pub full_path: String,
    pub registry: &'a GameRegistryInfo,
    pub executables: &'a [GameExecutableInfo],
}

impl<'a> From<&'a GameInstallInfo> for GameSnapshot<'a> {
    fn from(game: &'a GameInstallInfo) -> Self {
        Self {
            game_key: &game.game_key,
            drive: &game.drive,
            directory: &game.directory,
            folder: &game.folder,
            install_path: &game.install_path,
            full_path: game.full_path(),
            registry: &game.registry_info,
            executables: &game.executables,
        }
    }
}

/// Discover installed games; an empty result counts as a failure.
pub fn discover_catalog(config: &RunConfig) -> Result<GameCatalog> {
    let catalog =
        GameCatalog::discover_with(config).context("Failed to load installed Xbox games")?;
    if catalog.is_empty() {
        bail!("No installed games found under {}", config.registry_base);
    }
    Ok(catalog)
}

/// Load the policy document, or write the default one and fall back to the built-in list.
///
/// Errors only when no policy could be loaded and the default file cannot be written.
pub fn load_policy_or_default(path: &Path) -> Result<Vec<BinaryInfo>> {
    match policy::load(path) {
        Ok(binaries) if !binaries.is_empty() => return Ok(binaries),
        Ok(_) => warn!("Policy file {} lists no executables", path.display()),
        Err(err) => warn!("{err}"),
    }

    warn!("No policy entries loaded. Attempting to create default {}...", path.display());
    policy::create_default(path)
        .with_context(|| format!("Failed to create default {}", path.display()))?;

    println!("Default policy file created at: {}", canonicalize_or_current(path)?.display());
    println!("Please edit it and re-run the program.");
    println!("Using the built-in list for now.");
    Ok(policy::load_local_database())
}

/// Print every policy entry and whether it was applied.
pub fn print_loaded_exes(policy: &[BinaryInfo]) {
    println!("Loaded Binary Entries:");
    println!();
    for binary in policy {
        println!("Name: {}", binary.name);
        println!("Exe: {}", binary.exe_name);
        println!("Rename Requested: {}", binary.rename);
        if binary.rename {
            println!("New Name: {}", binary.new_exe_name);
        }
        println!("Rename Performed: {}", binary.was_renamed);
        println!("----------------------------");
    }
}

/// Print one catalog entry and any executables recorded for it.
pub fn print_game(game: &GameInstallInfo) {
    println!("Game Key: {}", game.game_key);
    println!("Drive: {}", game.drive);
    println!("Directory: {}", game.directory);
    println!("Folder: {}", game.folder);
    println!("Install Path: {}", game.install_path);
    println!("Full Path: {}", game.full_path());

    if !game.executables.is_empty() {
        println!("  [Executables found: {}]", game.executables.len());
        for exe in &game.executables {
            let marker = if exe.was_renamed { " (renamed)" } else { "" };
            println!("    - Executable: {}{marker}", exe.executable_name);
            println!("      Full Path: {}", exe.full_path.display());
        }
    }
    println!();
}

/// Print the whole catalog.
pub fn print_all_games(catalog: &GameCatalog) {
    for game in catalog.games() {
        print_game(game);
    }
}
