//! Build command implementation
//!
//! Implements `frontstage build`: load the manifest, validate the project
//! specs, run the orchestrator, and report per-target outcomes.

use anyhow::{bail, Result};
use std::path::Path;
use std::time::Duration;

use crate::cli::output::{self, status};
use crate::config::defaults::MANIFEST_FILE;
use crate::core::manifest::Manifest;
use crate::core::orchestrator::{BuildOptions, BuildStatus, Orchestrator};
use crate::core::{clean, spec};
use crate::infra::process::NpmRunner;

/// Build options from the command line
#[derive(Debug, Default)]
pub struct BuildCliOptions {
    /// Skip dependency installation for every project
    pub skip_install: bool,
    /// Remove previously staged output before building
    pub clean_first: bool,
    /// Force quiet mode for every project
    pub quiet_build: bool,
    /// Per-invocation timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Execute the build command
pub async fn execute(project_dir: &Path, options: BuildCliOptions) -> Result<()> {
    let manifest = Manifest::load(&project_dir.join(MANIFEST_FILE))?;
    let specs = spec::validate(project_dir, &manifest.projects)?;

    if specs.is_empty() {
        println!("{} No frontend projects configured, nothing to build", status::WARNING);
        return Ok(());
    }

    if options.clean_first {
        let report = clean::clean(&specs, false)?;
        tracing::info!("Removed {} previously staged directories", report.removed_count());
    }

    tracing::info!("Building {} frontend project(s)", specs.len());

    let build_options = BuildOptions {
        skip_install: options.skip_install,
        force_quiet: options.quiet_build,
        timeout: options.timeout_secs.map(Duration::from_secs),
    };
    let orchestrator = Orchestrator::new(NpmRunner::new(), build_options);

    // All subprocess output is suppressed, so show a spinner instead.
    let all_quiet = options.quiet_build || specs.iter().all(|s| s.quiet);
    let spinner = all_quiet.then(|| output::create_spinner("Building frontend projects..."));

    let report = orchestrator.run(&specs).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    for (spec, result) in specs.iter().zip(&report.results) {
        match result.status {
            BuildStatus::Success => {
                println!(
                    "{} {} ({:.1}s) staged to {}",
                    status::SUCCESS,
                    result.target,
                    result.duration.as_secs_f64(),
                    spec.output_dir.display()
                );
            }
            BuildStatus::Failed => {
                let stage = result.stage.map_or_else(String::new, |s| s.to_string());
                let cause = result.error.as_deref().unwrap_or("unknown error");
                println!("{} {} failed during {stage}: {cause}", status::ERROR, result.target);
            }
            BuildStatus::Skipped => {
                println!("{} {} skipped", status::SKIPPED, result.target);
            }
        }
    }

    if report.success {
        println!(
            "{} Build complete: {} succeeded, {} failed",
            status::SUCCESS,
            report.succeeded(),
            report.failed()
        );
        Ok(())
    } else {
        bail!(
            "build failed: {} succeeded, {} failed, {} skipped",
            report.succeeded(),
            report.failed(),
            report.skipped()
        );
    }
}
