//! Recursive search of install directories for executables.
//!
//! Matching here is a case-sensitive *substring* test on the file name. The rename
//! engine later requires an exact name, so a locate pass may record more files than
//! a rename pass touches.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::GameCatalog;
use crate::model::GameExecutableInfo;

/// A match reported by [`find_files`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundFile {
    pub game_key: String,
    pub file_name: String,
    pub full_path: PathBuf,
}

/// Record every regular file under each install whose name contains `substring`.
///
/// Returns the number of executables newly added to the catalog. A path already
/// recorded under any entry is not added again, so two packages sharing an install
/// directory own each file once.
pub fn locate(catalog: &mut GameCatalog, substring: &str) -> usize {
    let mut recorded: HashSet<PathBuf> = catalog
        .games()
        .iter()
        .flat_map(|game| game.executables.iter().map(|exe| exe.full_path.clone()))
        .collect();

    let mut added = 0;
    for game in catalog.games_mut() {
        let Some(root) = install_dir(&game.install_path) else {
            continue;
        };
        for (file_name, full_path) in matching_files(root, substring) {
            if !recorded.insert(full_path.clone()) {
                continue;
            }
            debug!(game = %game.game_key, path = %full_path.display(), "recorded executable");
            game.executables.push(GameExecutableInfo::new(file_name, full_path));
            added += 1;
        }
    }
    added
}

/// Report every regular file whose name contains `substring`, without recording it.
pub fn find_files(catalog: &GameCatalog, substring: &str) -> Vec<FoundFile> {
    let mut found = Vec::new();
    for game in catalog.games() {
        let Some(root) = install_dir(&game.install_path) else {
            continue;
        };
        for (file_name, full_path) in matching_files(root, substring) {
            info!(game = %game.game_key, "[FOUND] {file_name} at {}", full_path.display());
            found.push(FoundFile { game_key: game.game_key.clone(), file_name, full_path });
        }
    }
    if found.is_empty() {
        info!("No matching binary found: {substring}");
    }
    found
}

fn install_dir(install_path: &str) -> Option<&Path> {
    let path = Path::new(install_path);
    if path.is_dir() {
        Some(path)
    } else {
        debug!(path = install_path, "install path missing or not a directory; skipping");
        None
    }
}

/// Walk `root` and collect `(file name, full path)` for matching regular files.
///
/// The first traversal error ends the walk for this root; matches found before it
/// are kept.
fn matching_files(root: &Path, substring: &str) -> Vec<(String, PathBuf)> {
    let mut matches = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Error scanning folder: {} ({err})", root.display());
                break;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.contains(substring) {
            matches.push((file_name, entry.into_path()));
        }
    }
    matches
}
