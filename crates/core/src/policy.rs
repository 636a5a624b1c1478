//! Rename policy document: loading, defaults, and write-back.
//!
//! The document is a JSON object with an `exes` array:
//!
//! ```json
//! {
//!     "exes": [
//!         {
//!             "name": "csgo",
//!             "exeName": "csgo.exe",
//!             "rename": false,
//!             "newExeName": "cs2.exe",
//!             "renamed": false
//!         }
//!     ]
//! }
//! ```
//!
//! `renamed` is output only: [`load`] ignores it. Items are read leniently, so a
//! field of the wrong type is treated as absent rather than failing the document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::BinaryInfo;

/// Error type for policy document operations.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The document could not be read or written.
    #[error("Failed to access policy file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON.
    #[error("Failed to parse policy file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document has no top-level `exes` array.
    #[error("Invalid policy file {}: missing 'exes' array", path.display())]
    MissingExes { path: PathBuf },

    #[error("Failed to serialize policy document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

#[derive(Serialize)]
struct PolicyDocument<'a> {
    exes: Vec<PolicyRow<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolicyRow<'a> {
    name: &'a str,
    exe_name: &'a str,
    rename: bool,
    new_exe_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    renamed: Option<bool>,
}

impl<'a> PolicyRow<'a> {
    fn with_outcome(binary: &'a BinaryInfo) -> Self {
        Self {
            name: &binary.name,
            exe_name: &binary.exe_name,
            rename: binary.rename,
            new_exe_name: &binary.new_exe_name,
            renamed: Some(binary.was_renamed),
        }
    }
}

/// Load the policy list from `path`, dropping items without an `exeName`.
pub fn load(path: &Path) -> PolicyResult<Vec<BinaryInfo>> {
    read_document(path, false)
}

/// Like [`load`], but restores `was_renamed` from each item's `renamed` field.
///
/// Used to reverse the renames recorded by a previous run.
pub fn load_applied(path: &Path) -> PolicyResult<Vec<BinaryInfo>> {
    read_document(path, true)
}

/// Write the built-in starter document to `path`, replacing any existing file.
pub fn create_default(path: &Path) -> PolicyResult<()> {
    let rows = vec![
        PolicyRow {
            name: "csgo",
            exe_name: "csgo.exe",
            rename: false,
            new_exe_name: "cs2.exe",
            renamed: None,
        },
        PolicyRow {
            name: "Clair Obscur- Expedition 33",
            exe_name: "SandFall-WinGDK-Shipping.exe",
            rename: false,
            new_exe_name: "SandFall-Win64-Shipping.exe",
            renamed: None,
        },
    ];
    write_rows(path, rows)?;
    info!(path = %path.display(), "wrote default policy document");
    Ok(())
}

/// Persist the outcome of a run.
///
/// Leaves `path` untouched and returns `Ok(false)` when no entry was renamed;
/// otherwise rewrites the whole list and returns `Ok(true)`.
pub fn save(path: &Path, policy: &[BinaryInfo]) -> PolicyResult<bool> {
    if !policy.iter().any(|binary| binary.was_renamed) {
        debug!("No renames performed; policy file left unchanged");
        return Ok(false);
    }
    write_document(path, policy)?;
    info!("Updated policy saved at: {}", path.display());
    Ok(true)
}

/// Unconditionally write `policy`, including each entry's `renamed` flag, to `path`.
pub fn write_document(path: &Path, policy: &[BinaryInfo]) -> PolicyResult<()> {
    write_rows(path, policy.iter().map(PolicyRow::with_outcome).collect())
}

/// The built-in list used for a run when no policy document could be loaded.
pub fn load_local_database() -> Vec<BinaryInfo> {
    vec![
        BinaryInfo {
            name: "Clair Obscur - Expedition 33".to_string(),
            exe_name: "SandFall-Win64-Shipping.exe".to_string(),
            rename: false,
            new_exe_name: "SandFall-WinGDK-Shipping.exe".to_string(),
            was_renamed: false,
        },
        BinaryInfo {
            name: "Clair Obscur - Expedition 33 (GDK)".to_string(),
            exe_name: "SandFall-WinGDK-Shipping.exe".to_string(),
            rename: false,
            new_exe_name: "SandFall-Win64-Shipping.exe".to_string(),
            was_renamed: false,
        },
    ]
}

fn read_document(path: &Path, restore_outcome: bool) -> PolicyResult<Vec<BinaryInfo>> {
    let body = fs::read_to_string(path)
        .map_err(|source| PolicyError::Io { path: path.to_path_buf(), source })?;
    let document: Value = serde_json::from_str(&body)
        .map_err(|source| PolicyError::Parse { path: path.to_path_buf(), source })?;
    let items = document
        .get("exes")
        .and_then(Value::as_array)
        .ok_or_else(|| PolicyError::MissingExes { path: path.to_path_buf() })?;

    let binaries: Vec<BinaryInfo> =
        items.iter().filter_map(|item| parse_item(item, restore_outcome)).collect();
    debug!(path = %path.display(), loaded = binaries.len(), total = items.len(), "loaded policy");
    Ok(binaries)
}

fn parse_item(item: &Value, restore_outcome: bool) -> Option<BinaryInfo> {
    let text = |field: &str| item.get(field).and_then(Value::as_str).map(str::to_string);
    let flag = |field: &str| item.get(field).and_then(Value::as_bool).unwrap_or(false);

    let exe_name = text("exeName").filter(|name| !name.is_empty())?;
    let rename = flag("rename");
    Some(BinaryInfo {
        name: text("name").unwrap_or_default(),
        exe_name,
        rename,
        new_exe_name: if rename { text("newExeName").unwrap_or_default() } else { String::new() },
        was_renamed: restore_outcome && flag("renamed"),
    })
}

fn write_rows(path: &Path, rows: Vec<PolicyRow<'_>>) -> PolicyResult<()> {
    let document = PolicyDocument { exes: rows };
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    fs::write(path, buf).map_err(|source| PolicyError::Io { path: path.to_path_buf(), source })
}
