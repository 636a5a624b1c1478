//! Registry access and the two-level install walk.
//!
//! Installed packages are recorded under a base key as
//! `<base>\<first-level>\<package id>` with a `REG_SZ` value named `Root` holding the
//! install directory. Walking that tree is done once here, against any
//! [`RegistryHive`]:
//! - [`WindowsHive`] reads `HKEY_LOCAL_MACHINE` (Windows only).
//! - [`MemoryHive`] is an in-memory tree, loadable from a JSON snapshot.

mod memory;
#[cfg(windows)]
mod windows;

pub use memory::{MemoryHive, MemoryKey, MemoryValue};
#[cfg(windows)]
pub use windows::WindowsHive;

use thiserror::Error;
use tracing::{debug, error};

use crate::config::ROOT_VALUE_NAME;
use crate::paths::PATH_SEPARATOR;

/// Error type for registry reads.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A key could not be opened for reading.
    #[error("Failed to open registry key {path}: {reason}")]
    Access { path: String, reason: String },

    /// A value is missing or is not a `REG_SZ` string.
    #[error("Registry value '{name}' under {path} is missing or not a string")]
    ValueRead { path: String, name: String },

    /// No system registry exists on this platform.
    #[error("The system registry is not available on this platform; use a registry snapshot")]
    Unsupported,
}

/// Convenience result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Read-only view over a registry hive.
///
/// `Key` is an open handle; dropping it releases the underlying resource.
pub trait RegistryHive {
    type Key;

    /// Open the key at `path` (relative to the hive root) for reading.
    fn open_key(&self, path: &str) -> RegistryResult<Self::Key>;

    /// Names of the immediate subkeys of `key`. Enumeration stops at the first error.
    fn subkey_names(&self, key: &Self::Key) -> Vec<String>;

    /// Read the `REG_SZ` value `name` from `key`.
    fn string_value(&self, key: &Self::Key, name: &str) -> RegistryResult<String>;
}

/// One package found by [`enumerate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Full path of the second-level key.
    pub key_path: String,
    /// Value of `Root` as stored.
    pub root_path: String,
    /// Name of the second-level key.
    pub package_id: String,
}

/// Join a parent key path and a child key name.
pub fn join_key(parent: &str, child: &str) -> String {
    format!("{parent}{PATH_SEPARATOR}{child}")
}

/// Walk `base_path` two levels deep and collect every key exposing a `Root` string.
///
/// Only failure to open `base_path` itself is an error. First-level keys that cannot
/// be opened, and second-level keys that cannot be opened or lack a string `Root`,
/// are skipped.
pub fn enumerate<H: RegistryHive>(hive: &H, base_path: &str) -> RegistryResult<Vec<RegistryEntry>> {
    let base = hive.open_key(base_path).map_err(|err| {
        error!("Failed to open base registry key: {err}");
        err
    })?;

    let mut entries = Vec::new();
    for first in hive.subkey_names(&base) {
        let first_path = join_key(base_path, &first);
        let first_key = match hive.open_key(&first_path) {
            Ok(key) => key,
            Err(err) => {
                debug!("Skipping registry key: {err}");
                continue;
            }
        };

        for second in hive.subkey_names(&first_key) {
            let key_path = join_key(&first_path, &second);
            let second_key = match hive.open_key(&key_path) {
                Ok(key) => key,
                Err(err) => {
                    debug!("Skipping registry key: {err}");
                    continue;
                }
            };

            match hive.string_value(&second_key, ROOT_VALUE_NAME) {
                Ok(root_path) => {
                    debug!(package = %second, root = %root_path, "found package root");
                    entries.push(RegistryEntry { key_path, root_path, package_id: second });
                }
                Err(err) => debug!("{err}"),
            }
        }
    }

    Ok(entries)
}
