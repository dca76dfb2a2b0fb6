//! Build orchestration
//!
//! Drives each project through the install → build → detect → stage
//! pipeline, strictly sequentially and in configuration order, and applies
//! the failure policy: a failed required project aborts the run (remaining
//! targets are recorded as skipped), a failed optional project is recorded
//! and the run continues.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::defaults::{npm_program, BUILD_SCRIPT};
use crate::core::detect;
use crate::core::spec::ProjectSpec;
use crate::core::stage;
use crate::error::ProcessError;
use crate::infra::process::{ProcessOutcome, ProcessRequest, ProcessRunner};

/// Pipeline stage a failure occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Dependency installation (`npm install`)
    Install,
    /// Project build (`npm run build`)
    Build,
    /// Artifact directory detection
    Detect,
    /// Staging copy into the output directory
    Stage,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Install => "install",
            Self::Build => "build",
            Self::Detect => "detect",
            Self::Stage => "stage",
        };
        write!(f, "{name}")
    }
}

/// Outcome status of one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// All pipeline stages completed
    Success,
    /// A pipeline stage failed
    Failed,
    /// Never started because an earlier required target failed
    Skipped,
}

/// Outcome of processing one project spec
///
/// Created when the target's pipeline starts and immutable once it
/// finishes.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Target name
    pub target: String,
    /// Outcome status
    pub status: BuildStatus,
    /// Staged artifacts source, populated only on success
    pub artifacts_path: Option<PathBuf>,
    /// Stage the failure occurred in, populated only on failure
    pub stage: Option<PipelineStage>,
    /// Human-readable cause, populated only on failure
    pub error: Option<String>,
    /// Wall-clock time spent on this target
    pub duration: Duration,
}

impl BuildResult {
    fn skipped(target: &str) -> Self {
        Self {
            target: target.to_string(),
            status: BuildStatus::Skipped,
            artifacts_path: None,
            stage: None,
            error: None,
            duration: Duration::ZERO,
        }
    }
}

/// Aggregate of all build results for a run
///
/// Results keep configuration order. Overall success requires every
/// non-optional project to have succeeded.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Per-target outcomes, in configuration order
    pub results: Vec<BuildResult>,
    /// Overall run status
    pub success: bool,
}

impl BuildReport {
    /// Number of targets that built and staged successfully
    pub fn succeeded(&self) -> usize {
        self.count(BuildStatus::Success)
    }

    /// Number of targets that failed
    pub fn failed(&self) -> usize {
        self.count(BuildStatus::Failed)
    }

    /// Number of targets skipped after an abort
    pub fn skipped(&self) -> usize {
        self.count(BuildStatus::Skipped)
    }

    fn count(&self, status: BuildStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// Options controlling a build run
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Skip the dependency-installation step for every project
    pub skip_install: bool,
    /// Force quiet mode for every project
    pub force_quiet: bool,
    /// Timeout applied to each install/build invocation
    pub timeout: Option<Duration>,
}

/// Drives the per-project pipeline across all configured projects
pub struct Orchestrator<R: ProcessRunner> {
    runner: R,
    options: BuildOptions,
}

impl<R: ProcessRunner> Orchestrator<R> {
    /// Create an orchestrator over the given process runner
    pub fn new(runner: R, options: BuildOptions) -> Self {
        Self { runner, options }
    }

    /// Run the full pipeline for every spec, in order
    ///
    /// Never returns an error: stage-level failures are converted into
    /// failed results and the failure policy decides whether to continue.
    pub async fn run(&self, specs: &[ProjectSpec]) -> BuildReport {
        let mut report = BuildReport {
            results: Vec::with_capacity(specs.len()),
            success: true,
        };
        let mut aborted = false;

        for spec in specs {
            if aborted {
                report.results.push(BuildResult::skipped(&spec.target));
                continue;
            }

            let started = Instant::now();
            let result = match self.run_target(spec).await {
                Ok(artifacts_path) => {
                    tracing::info!("Target '{}' built and staged", spec.target);
                    BuildResult {
                        target: spec.target.clone(),
                        status: BuildStatus::Success,
                        artifacts_path: Some(artifacts_path),
                        stage: None,
                        error: None,
                        duration: started.elapsed(),
                    }
                }
                Err((stage, cause)) => {
                    if spec.optional {
                        tracing::warn!(
                            "Optional target '{}' failed during {stage}: {cause}",
                            spec.target
                        );
                    } else {
                        tracing::error!(
                            "Target '{}' failed during {stage}: {cause}",
                            spec.target
                        );
                        report.success = false;
                        aborted = true;
                    }
                    BuildResult {
                        target: spec.target.clone(),
                        status: BuildStatus::Failed,
                        artifacts_path: None,
                        stage: Some(stage),
                        error: Some(cause),
                        duration: started.elapsed(),
                    }
                }
            };
            report.results.push(result);
        }

        report
    }

    /// One target's pipeline: install → build → detect → stage
    async fn run_target(&self, spec: &ProjectSpec) -> Result<PathBuf, (PipelineStage, String)> {
        let npm = npm_program();
        let quiet = self.options.force_quiet || spec.quiet;

        if self.options.skip_install {
            tracing::debug!("Skipping dependency install for '{}'", spec.target);
        } else {
            tracing::info!("Installing dependencies for '{}'", spec.target);
            let mut args = vec!["install".to_string()];
            args.extend(spec.args.iter().cloned());
            self.run_step(spec, &npm, args, quiet)
                .await
                .map_err(|cause| (PipelineStage::Install, cause))?;
        }

        tracing::info!("Building '{}'", spec.target);
        let args = vec!["run".to_string(), BUILD_SCRIPT.to_string()];
        self.run_step(spec, &npm, args, quiet)
            .await
            .map_err(|cause| (PipelineStage::Build, cause))?;

        let artifacts_path =
            detect::detect(spec).map_err(|e| (PipelineStage::Detect, e.to_string()))?;

        tracing::info!(
            "Staging {} into {}",
            artifacts_path.display(),
            spec.output_dir.display()
        );
        stage::stage(&artifacts_path, &spec.output_dir, &spec.exclude_dirs)
            .map_err(|e| (PipelineStage::Stage, e.to_string()))?;

        Ok(artifacts_path)
    }

    /// Run one subprocess step, mapping unsuccessful outcomes to causes
    async fn run_step(
        &self,
        spec: &ProjectSpec,
        program: &str,
        args: Vec<String>,
        quiet: bool,
    ) -> Result<ProcessOutcome, String> {
        let mut request = ProcessRequest::new(program, args, spec.source_dir.clone());
        request.env = spec.env.clone();
        request.quiet = quiet;
        request.timeout = self.options.timeout;

        let command = request.command_line();
        let outcome = self.runner.run(&request).await.map_err(|e| e.to_string())?;

        if outcome.timed_out {
            let seconds = self.options.timeout.map_or(0, |t| t.as_secs());
            return Err(ProcessError::TimedOut { command, seconds }.to_string());
        }
        if !outcome.success() {
            let code = outcome.exit_code.unwrap_or(-1);
            return Err(ProcessError::NonZeroExit { command, code }.to_string());
        }
        Ok(outcome)
    }
}
