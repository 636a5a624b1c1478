use std::path::Path;

use anyhow::{anyhow, Context, Result};

use xbox_exe_core::{locate, policy, rename, RunConfig};

use crate::canonicalize_or_current;
use crate::commands::{discover_catalog, print_loaded_exes};

/// Write the default policy document.
pub fn init_policy_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "Policy file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    policy::create_default(path)
        .with_context(|| format!("Failed to create default {}", path.display()))?;

    println!("Default policy file created at: {}", canonicalize_or_current(path)?.display());
    Ok(())
}

/// Reverse the renames recorded in the policy document by a previous scan.
pub fn rollback_command(config: &RunConfig) -> Result<()> {
    let mut binaries = policy::load_applied(&config.policy_path)
        .with_context(|| format!("Failed to load {}", config.policy_path.display()))?;

    let pending: Vec<String> = binaries
        .iter()
        .filter(|binary| binary.was_renamed && binary.wants_rename())
        .map(|binary| binary.new_exe_name.clone())
        .collect();
    if pending.is_empty() {
        println!("Nothing to roll back.");
        return Ok(());
    }

    let mut catalog = discover_catalog(config)?;
    for new_exe_name in &pending {
        locate::locate(&mut catalog, new_exe_name);
    }

    let summary = rename::rollback(&mut catalog, &mut binaries);
    println!("Rolled back {} executable(s); {} failed.", summary.renamed, summary.failed);
    print_loaded_exes(&binaries);

    if summary.renamed > 0 {
        policy::write_document(&config.policy_path, &binaries).with_context(|| {
            format!("Failed to write {}", config.policy_path.display())
        })?;
    }

    Ok(())
}
