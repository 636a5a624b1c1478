//! In-memory catalog of discovered installs.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::RunConfig;
use crate::model::GameInstallInfo;
use crate::registry::{self, MemoryHive, RegistryEntry, RegistryHive, RegistryResult};

/// Discovered installs for one run. Owns every entry and its executable list.
#[derive(Debug, Clone, Default)]
pub struct GameCatalog {
    games: Vec<GameInstallInfo>,
}

impl GameCatalog {
    /// Build a catalog from raw registry records, preserving their order.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        Self { games: entries.into_iter().map(GameInstallInfo::from_registry).collect() }
    }

    /// Enumerate `base_path` in `hive` and build a catalog from every package found.
    pub fn discover<H: RegistryHive>(hive: &H, base_path: &str) -> RegistryResult<Self> {
        let entries = registry::enumerate(hive, base_path)?;
        let catalog = Self::from_entries(entries);
        info!(games = catalog.len(), base = base_path, "catalog discovery complete");
        Ok(catalog)
    }

    /// Discover installs from the system registry.
    #[cfg(windows)]
    pub fn discover_installed(base_path: &str) -> RegistryResult<Self> {
        Self::discover(&registry::WindowsHive::local_machine(), base_path)
    }

    /// Discover installs from the system registry.
    #[cfg(not(windows))]
    pub fn discover_installed(_base_path: &str) -> RegistryResult<Self> {
        Err(registry::RegistryError::Unsupported)
    }

    /// Discover using the source selected by `config`: a snapshot if one is set,
    /// otherwise the system registry.
    pub fn discover_with(config: &RunConfig) -> Result<Self> {
        match &config.registry_snapshot {
            Some(snapshot) => {
                let hive = MemoryHive::load(snapshot)?;
                Self::discover(&hive, &config.registry_base).with_context(|| {
                    format!("Failed to enumerate registry snapshot {}", snapshot.display())
                })
            }
            None => Self::discover_installed(&config.registry_base)
                .context("Failed to enumerate installed packages"),
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn games(&self) -> &[GameInstallInfo] {
        &self.games
    }

    pub fn games_mut(&mut self) -> &mut [GameInstallInfo] {
        &mut self.games
    }

    /// Look up an entry by its game key.
    pub fn get(&self, game_key: &str) -> Option<&GameInstallInfo> {
        self.games.iter().find(|game| game.game_key == game_key)
    }

    /// Total executables recorded across all entries.
    pub fn executable_count(&self) -> usize {
        self.games.iter().map(|game| game.executables.len()).sum()
    }
}
