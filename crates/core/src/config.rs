//! Run-wide constants and the per-run settings passed into discovery and policy I/O.

use std::path::PathBuf;

/// Default policy document name, resolved against the working directory.
pub const DEFAULT_POLICY_FILE: &str = "xboxGames.json";

/// Registry key (under `HKEY_LOCAL_MACHINE`) listing gaming-services package installs.
pub const PACKAGE_REPOSITORY_ROOT: &str =
    r"SOFTWARE\Microsoft\GamingServices\PackageRepository\Root";

/// Name of the value holding a package's install directory.
pub const ROOT_VALUE_NAME: &str = "Root";

/// Settings for a single run, assembled by the frontend from its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Path to the rename policy document.
    pub policy_path: PathBuf,
    /// Registry key to enumerate packages under.
    pub registry_base: String,
    /// Read packages from this JSON snapshot instead of the system registry.
    pub registry_snapshot: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            policy_path: PathBuf::from(DEFAULT_POLICY_FILE),
            registry_base: PACKAGE_REPOSITORY_ROOT.to_string(),
            registry_snapshot: None,
        }
    }
}

impl RunConfig {
    /// Builder-style helper to point at a registry snapshot.
    pub fn with_snapshot(mut self, snapshot: impl Into<PathBuf>) -> Self {
        self.registry_snapshot = Some(snapshot.into());
        self
    }

    /// Builder-style helper to use a different policy document.
    pub fn with_policy(mut self, policy_path: impl Into<PathBuf>) -> Self {
        self.policy_path = policy_path.into();
        self
    }
}
