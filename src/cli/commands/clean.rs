//! Clean command implementation
//!
//! Removes staged output for every configured project and, with `--cache`,
//! the frontend dependency caches as well.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::status;
use crate::config::defaults::MANIFEST_FILE;
use crate::core::manifest::Manifest;
use crate::core::{clean, spec};

/// Execute the clean command
pub async fn execute(project_dir: &Path, include_dependency_cache: bool) -> Result<()> {
    let manifest = Manifest::load(&project_dir.join(MANIFEST_FILE))?;
    let specs = spec::validate(project_dir, &manifest.projects)?;

    let report = clean::clean(&specs, include_dependency_cache)
        .with_context(|| "Failed to clean staged output")?;

    if report.removed_count() == 0 {
        println!("{} Nothing to clean", status::SUCCESS);
        return Ok(());
    }

    println!("{} Cleaned staged output:", status::SUCCESS);
    for entry in &report.entries {
        for dir in &entry.removed {
            println!("  Removed {}", dir.display());
        }
    }

    Ok(())
}
