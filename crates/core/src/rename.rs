//! Applying (and reversing) policy renames to located executables.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::catalog::GameCatalog;
use crate::locate;
use crate::model::BinaryInfo;

/// Error type for a single rename attempt.
#[derive(Debug, Error)]
pub enum RenameError {
    /// The source file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A file already exists under the replacement name.
    #[error("Target already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// The replacement is empty or not a plain file name.
    #[error("Invalid target file name '{0}'")]
    InvalidName(String),

    /// The filesystem refused the rename.
    #[error("Rename of {} to {} failed: {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome counts for a batch of renames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl RenameSummary {
    fn record_failure(&mut self, err: &RenameError) {
        self.failed += 1;
        self.errors.push(err.to_string());
    }
}

/// Rename `path` to `new_name` within its parent directory and return the new path.
///
/// An existing file under `new_name` is never replaced.
pub fn rename_file(path: &Path, new_name: &str) -> Result<PathBuf, RenameError> {
    if !is_plain_file_name(new_name) {
        return Err(RenameError::InvalidName(new_name.to_string()));
    }
    if !path.exists() {
        return Err(RenameError::FileNotFound(path.to_path_buf()));
    }

    let target = path.with_file_name(new_name);
    if target.exists() {
        return Err(RenameError::TargetExists(target));
    }
    fs::rename(path, &target).map_err(|source| RenameError::Io {
        from: path.to_path_buf(),
        to: target.clone(),
        source,
    })?;

    info!(
        "Renamed: {} -> {new_name}",
        path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default()
    );
    Ok(target)
}

/// Locate each policy entry's executable and rename exact-name matches when requested.
///
/// Every rename is independent; failures are logged and counted.
pub fn process_policy(catalog: &mut GameCatalog, policy: &mut [BinaryInfo]) -> RenameSummary {
    let mut summary = RenameSummary::default();

    for binary in policy.iter_mut() {
        info!("Searching for: {} [{}]", binary.name, binary.exe_name);
        locate::locate(catalog, &binary.exe_name);

        if !binary.wants_rename() {
            continue;
        }

        for game in catalog.games_mut() {
            let matches =
                game.executables.iter_mut().filter(|exe| exe.executable_name == binary.exe_name);
            for exe in matches {
                match rename_file(&exe.full_path, &binary.new_exe_name) {
                    Ok(new_path) => {
                        binary.was_renamed = true;
                        exe.was_renamed = true;
                        exe.executable_name = binary.new_exe_name.clone();
                        exe.full_path = new_path;
                        summary.renamed += 1;
                    }
                    Err(err) => {
                        error!("Rename failed: {err}");
                        summary.record_failure(&err);
                    }
                }
            }
        }
    }

    summary
}

/// Reverse renames for every policy entry marked as renamed.
///
/// Executables currently named `new_exe_name` are renamed back to `exe_name` and
/// both records have `was_renamed` cleared.
pub fn rollback(catalog: &mut GameCatalog, policy: &mut [BinaryInfo]) -> RenameSummary {
    let mut summary = RenameSummary::default();

    for binary in policy.iter_mut() {
        if !(binary.was_renamed && binary.wants_rename() && !binary.exe_name.is_empty()) {
            continue;
        }

        for game in catalog.games_mut() {
            let renamed = game
                .executables
                .iter_mut()
                .filter(|exe| exe.executable_name == binary.new_exe_name);
            for exe in renamed {
                match rename_file(&exe.full_path, &binary.exe_name) {
                    Ok(original_path) => {
                        info!("Rolled back: {} -> {}", binary.new_exe_name, binary.exe_name);
                        exe.was_renamed = false;
                        exe.executable_name = binary.exe_name.clone();
                        exe.full_path = original_path;
                        binary.was_renamed = false;
                        summary.renamed += 1;
                    }
                    Err(err) => {
                        warn!("Failed to rollback {}: {err}", binary.new_exe_name);
                        summary.record_failure(&err);
                    }
                }
            }
        }
    }

    summary
}

fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}
