//! Validate command implementation
//!
//! Runs manifest parsing and spec validation only, without touching npm or
//! the staging tree. Exit code 0 means the configuration is usable.

use anyhow::Result;
use std::path::Path;

use crate::cli::output::status;
use crate::config::defaults::MANIFEST_FILE;
use crate::core::manifest::Manifest;
use crate::core::spec;

/// Execute the validate command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = Manifest::load(&project_dir.join(MANIFEST_FILE))?;
    let specs = spec::validate(project_dir, &manifest.projects)?;

    println!("{} {} project spec(s) valid", status::SUCCESS, specs.len());
    for spec in &specs {
        println!(
            "  {} ({} -> {})",
            spec.target,
            spec.source_dir.display(),
            spec.output_dir.display()
        );
    }

    Ok(())
}
