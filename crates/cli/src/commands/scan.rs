use anyhow::Result;
use tracing::{error, warn};

use xbox_exe_core::{policy, rename, RunConfig};

use crate::commands::{discover_catalog, load_policy_or_default, print_all_games, print_loaded_exes};

/// Full pipeline: discover installs, apply the policy, report, and save the outcome.
///
/// Fails only when discovery fails or when no policy exists and the default
/// document cannot be written. Per-file rename failures and save failures are
/// logged.
pub fn scan_command(config: &RunConfig) -> Result<()> {
    let mut catalog = discover_catalog(config)?;
    println!("Loaded {} games successfully for processing.", catalog.len());

    let mut binaries = load_policy_or_default(&config.policy_path)?;

    let summary = rename::process_policy(&mut catalog, &mut binaries);
    if summary.failed > 0 {
        warn!("{} rename(s) failed", summary.failed);
    }

    print_loaded_exes(&binaries);
    print_all_games(&catalog);

    if let Err(err) = policy::save(&config.policy_path, &binaries) {
        error!("Failed to save updated policy file: {err}");
    }

    Ok(())
}
