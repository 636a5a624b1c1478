use anyhow::Result;

use xbox_exe_core::{locate, RunConfig};

use crate::commands::{discover_catalog, print_all_games, GameSnapshot};

/// List discovered installs without scanning or renaming anything.
pub fn list_games_command(config: &RunConfig, json: bool) -> Result<()> {
    let catalog = discover_catalog(config)?;

    if json {
        let snapshots: Vec<GameSnapshot<'_>> =
            catalog.games().iter().map(GameSnapshot::from).collect();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    println!("Games ({}):", catalog.len());
    println!();
    print_all_games(&catalog);
    Ok(())
}

/// Report every file under any install whose name contains `pattern`.
pub fn find_command(config: &RunConfig, pattern: &str, json: bool) -> Result<()> {
    let catalog = discover_catalog(config)?;
    let found = locate::find_files(&catalog, pattern);

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No matching binary found: {pattern}");
        return Ok(());
    }

    for file in found {
        println!("[FOUND]");
        println!("Game Key: {}", file.game_key);
        println!("Binary Name: {}", file.file_name);
        println!("Full Path: {}", file.full_path.display());
    }
    Ok(())
}
