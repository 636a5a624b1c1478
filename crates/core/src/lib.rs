//! xbox-exe-core
//!
//! Core library for discovering locally installed packaged games and renaming
//! their executables according to an editable policy document.
//!
//! The pipeline, leaf-first:
//! - `registry`: two-level walk of the package repository key.
//! - `paths`: normalization of raw `Root` values.
//! - `catalog`: the in-memory list of installs for a run.
//! - `locate`: recursive filename search under each install.
//! - `rename`: applying and reversing policy renames.
//! - `policy`: the JSON policy document and built-in defaults.
//!
//! All substantive logic lives here so it can be tested without a Windows
//! registry; the CLI only wires arguments, logging and console output.

pub mod catalog;
pub mod config;
pub mod locate;
pub mod model;
pub mod paths;
pub mod policy;
pub mod registry;
pub mod rename;

pub use catalog::GameCatalog;
pub use config::RunConfig;
pub use model::{BinaryInfo, GameExecutableInfo, GameInstallInfo, GameRegistryInfo};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
