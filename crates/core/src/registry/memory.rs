use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{join_key, RegistryError, RegistryHive, RegistryResult};
use crate::paths::PATH_SEPARATOR;

/// A typed registry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum MemoryValue {
    /// `REG_SZ`
    String(String),
    /// `REG_EXPAND_SZ`
    ExpandString(String),
    /// `REG_DWORD`
    Dword(u32),
}

/// A key in a [`MemoryHive`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryKey {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, MemoryValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub subkeys: BTreeMap<String, MemoryKey>,
    /// Opening this key fails as if access were denied.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub denied: bool,
}

impl MemoryKey {
    fn child(&self, name: &str) -> Option<&MemoryKey> {
        self.subkeys.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, key)| key)
    }

    fn child_mut(&mut self, name: &str) -> &mut MemoryKey {
        let existing = self.subkeys.keys().find(|key| key.eq_ignore_ascii_case(name)).cloned();
        self.subkeys.entry(existing.unwrap_or_else(|| name.to_string())).or_default()
    }
}

/// In-memory registry hive.
///
/// Key names are matched ASCII case-insensitively and subkeys enumerate in name
/// order. Serializes to the JSON snapshot format accepted by the CLI's
/// `--registry-snapshot` flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryHive {
    #[serde(default)]
    pub root: MemoryKey,
}

/// Open handle into a [`MemoryHive`]: the path segments of the key.
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    path: String,
    segments: Vec<String>,
}

impl MemoryHive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a hive from a JSON snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry snapshot {}", path.display()))?;
        let hive = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse registry snapshot {}", path.display()))?;
        Ok(hive)
    }

    /// Write this hive as a JSON snapshot.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let serialized =
            serde_json::to_string_pretty(self).context("Failed to serialize registry snapshot")?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write registry snapshot {}", path.display()))
    }

    /// Mutable access to the key at `path`, creating it and any missing parents.
    pub fn key_mut(&mut self, path: &str) -> &mut MemoryKey {
        split_path(path).into_iter().fold(&mut self.root, |key, segment| key.child_mut(&segment))
    }

    /// Builder-style helper: create the key at `path`.
    pub fn with_key(mut self, path: &str) -> Self {
        self.key_mut(path);
        self
    }

    /// Builder-style helper: set value `name` on the key at `path`.
    pub fn with_value(mut self, path: &str, name: &str, value: MemoryValue) -> Self {
        self.key_mut(path).values.insert(name.to_string(), value);
        self
    }

    /// Builder-style helper: set a `REG_SZ` value.
    pub fn with_string(self, path: &str, name: &str, value: impl Into<String>) -> Self {
        self.with_value(path, name, MemoryValue::String(value.into()))
    }

    /// Builder-style helper: make opening the key at `path` fail.
    pub fn with_denied(mut self, path: &str) -> Self {
        self.key_mut(path).denied = true;
        self
    }

    /// Builder-style helper: register a package the way the gaming services lay it out.
    pub fn with_package(self, base: &str, group: &str, package_id: &str, root: &str) -> Self {
        let key = join_key(&join_key(base, group), package_id);
        self.with_string(&key, crate::config::ROOT_VALUE_NAME, root)
    }

    fn resolve(&self, segments: &[String]) -> Option<&MemoryKey> {
        segments.iter().try_fold(&self.root, |key, segment| key.child(segment))
    }
}

impl RegistryHive for MemoryHive {
    type Key = MemoryHandle;

    fn open_key(&self, path: &str) -> RegistryResult<MemoryHandle> {
        let segments = split_path(path);
        let mut key = &self.root;
        for segment in &segments {
            key = key.child(segment).ok_or_else(|| RegistryError::Access {
                path: path.to_string(),
                reason: "key not found".to_string(),
            })?;
            if key.denied {
                return Err(RegistryError::Access {
                    path: path.to_string(),
                    reason: "access denied".to_string(),
                });
            }
        }
        Ok(MemoryHandle { path: path.to_string(), segments })
    }

    fn subkey_names(&self, key: &MemoryHandle) -> Vec<String> {
        self.resolve(&key.segments)
            .map(|key| key.subkeys.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn string_value(&self, key: &MemoryHandle, name: &str) -> RegistryResult<String> {
        let value = self
            .resolve(&key.segments)
            .and_then(|key| key.values.iter().find(|(value, _)| value.eq_ignore_ascii_case(name)));
        match value {
            Some((_, MemoryValue::String(text))) => Ok(text.clone()),
            _ => Err(RegistryError::ValueRead { path: key.path.clone(), name: name.to_string() }),
        }
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split(PATH_SEPARATOR).filter(|segment| !segment.is_empty()).map(str::to_string).collect()
}
