//! Core data model for discovered installs, their executables, and rename policy rows.
//!
//! Catalog types (`GameInstallInfo`, `GameExecutableInfo`, `GameRegistryInfo`) live for
//! the duration of a run and are never persisted. `BinaryInfo` is the one type that
//! round-trips through the policy document on disk.

use std::path::PathBuf;

use serde::Serialize;

use crate::paths::{self, PATH_SEPARATOR};
use crate::registry::RegistryEntry;

/// Provenance of a catalog entry: where in the registry it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRegistryInfo {
    /// Package identifier (e.g. `38985CA0.SomeGame_abc`).
    pub package_id: String,
    /// Full registry path of the key holding the `Root` value.
    pub reg_key_path: String,
    /// The `Root` value exactly as read from the registry.
    pub root_path: String,
}

/// An executable found beneath an install directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameExecutableInfo {
    /// Current file name (updated after a rename).
    pub executable_name: String,
    /// Current full path on disk (updated after a rename).
    pub full_path: PathBuf,
    /// Whether this run renamed the file.
    pub was_renamed: bool,
}

impl GameExecutableInfo {
    pub fn new(executable_name: impl Into<String>, full_path: impl Into<PathBuf>) -> Self {
        Self {
            executable_name: executable_name.into(),
            full_path: full_path.into(),
            was_renamed: false,
        }
    }
}

/// One installed game discovered through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInstallInfo {
    /// Catalog key; equal to the package identifier.
    pub game_key: String,
    /// First two characters of `install_path` (e.g. `C:`), or empty.
    pub drive: String,
    /// Parent directory of the install folder.
    pub directory: String,
    /// Leaf folder name of the install.
    pub folder: String,
    /// Normalized install path (prefix and trailing separator removed).
    pub install_path: String,
    pub registry_info: GameRegistryInfo,
    /// Executables recorded by locate/rename passes, in discovery order.
    pub executables: Vec<GameExecutableInfo>,
}

impl GameInstallInfo {
    /// Build a catalog entry from a raw registry record.
    pub fn from_registry(entry: RegistryEntry) -> Self {
        let normalized = paths::normalize(&entry.root_path);
        Self {
            game_key: entry.package_id.clone(),
            drive: normalized.drive,
            directory: normalized.directory,
            folder: normalized.folder,
            install_path: normalized.install_path,
            registry_info: GameRegistryInfo {
                package_id: entry.package_id,
                reg_key_path: entry.key_path,
                root_path: entry.root_path,
            },
            executables: Vec::new(),
        }
    }

    /// `directory` and `folder` joined by the Windows path separator.
    ///
    /// Always derived from the parts, never stored.
    pub fn full_path(&self) -> String {
        format!("{}{}{}", self.directory, PATH_SEPARATOR, self.folder)
    }
}

/// One row of the user-editable rename policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryInfo {
    /// Display name of the game.
    pub name: String,
    /// File name (or substring for locating) of the executable.
    pub exe_name: String,
    /// Whether the executable should be renamed.
    pub rename: bool,
    /// Replacement file name; only meaningful when `rename` is set.
    pub new_exe_name: String,
    /// Set once a rename of this entry actually happened.
    pub was_renamed: bool,
}

impl BinaryInfo {
    pub fn new(name: impl Into<String>, exe_name: impl Into<String>) -> Self {
        Self { name: name.into(), exe_name: exe_name.into(), ..Self::default() }
    }

    /// Builder-style helper to request a rename to `new_exe_name`.
    pub fn renamed_to(mut self, new_exe_name: impl Into<String>) -> Self {
        self.rename = true;
        self.new_exe_name = new_exe_name.into();
        self
    }

    /// True when this entry asks for a rename and names a replacement.
    pub fn wants_rename(&self) -> bool {
        self.rename && !self.new_exe_name.is_empty()
    }
}
