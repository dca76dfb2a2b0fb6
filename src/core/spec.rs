//! Project spec model and validation
//!
//! Turns raw manifest entries into validated, immutable [`ProjectSpec`]
//! values. Validation is fail-fast: the first violated invariant is
//! reported with the offending target and field.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::defaults::{DEFAULT_OUTPUT_ROOT, PROJECT_DESCRIPTOR};
use crate::core::manifest::RawProjectSpec;
use crate::error::ConfigurationError;

/// A validated description of one frontend project to build
///
/// Paths are resolved against the project root at validation time and the
/// spec is never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSpec {
    /// Unique target name within the run
    pub target: String,
    /// Resolved path to the frontend project root
    pub source_dir: PathBuf,
    /// Build output directory relative to `source_dir`, if configured
    pub artifacts_dir: Option<PathBuf>,
    /// Resolved staging destination
    pub output_dir: PathBuf,
    /// Extra arguments for the install invocation
    pub args: Vec<String>,
    /// Suppress streaming of subprocess output
    pub quiet: bool,
    /// Failure does not abort the overall run
    pub optional: bool,
    /// Staging excludes in addition to the dependency cache
    pub exclude_dirs: Vec<String>,
    /// Environment overrides for subprocess invocations
    pub env: HashMap<String, String>,
}

impl ProjectSpec {
    /// Full path of the explicitly configured artifacts directory, if any
    pub fn explicit_artifacts_path(&self) -> Option<PathBuf> {
        self.artifacts_dir.as_ref().map(|d| self.source_dir.join(d))
    }
}

/// Validate raw manifest entries into project specs
///
/// Checks, in order per entry: required fields, target uniqueness,
/// source directory existence and descriptor presence, relative
/// `artifacts_dir`, non-empty `args`, and the output-directory invariants
/// (never inside the source tree, pairwise disjoint across targets).
pub fn validate(
    project_root: &Path,
    raw_specs: &[RawProjectSpec],
) -> Result<Vec<ProjectSpec>, ConfigurationError> {
    let mut specs: Vec<ProjectSpec> = Vec::with_capacity(raw_specs.len());

    for raw in raw_specs {
        let spec = validate_one(project_root, raw, &specs)?;
        specs.push(spec);
    }

    Ok(specs)
}

/// Target-derived staging destination used when `output_dir` is unset
///
/// When the shared staging root would overlap the target's own source tree
/// (a project whose sources live in a directory with the same name), a
/// sibling directory is used instead so the derived default never conflicts.
fn default_output_dir(project_root: &Path, target: &str, source_dir: &Path) -> PathBuf {
    let primary = project_root.join(DEFAULT_OUTPUT_ROOT).join(target);
    if primary.starts_with(source_dir) || source_dir.starts_with(&primary) {
        return project_root.join(format!("{target}-{DEFAULT_OUTPUT_ROOT}"));
    }
    primary
}

fn validate_one(
    project_root: &Path,
    raw: &RawProjectSpec,
    accepted: &[ProjectSpec],
) -> Result<ProjectSpec, ConfigurationError> {
    if raw.target.is_empty() {
        return Err(ConfigurationError::MissingField {
            target: "<unnamed>".to_string(),
            field: "target".to_string(),
        });
    }
    if raw.source_dir.is_empty() {
        return Err(ConfigurationError::MissingField {
            target: raw.target.clone(),
            field: "source_dir".to_string(),
        });
    }

    if accepted.iter().any(|s| s.target == raw.target) {
        return Err(ConfigurationError::DuplicateTarget {
            target: raw.target.clone(),
        });
    }

    let source_dir = project_root.join(&raw.source_dir);
    if !source_dir.exists() {
        return Err(ConfigurationError::SourceDirNotFound {
            target: raw.target.clone(),
            path: source_dir,
        });
    }
    if !source_dir.is_dir() {
        return Err(ConfigurationError::SourceDirNotADirectory {
            target: raw.target.clone(),
            path: source_dir,
        });
    }
    let descriptor = source_dir.join(PROJECT_DESCRIPTOR);
    if !descriptor.exists() {
        return Err(ConfigurationError::MissingDescriptor {
            target: raw.target.clone(),
            path: descriptor,
        });
    }

    let artifacts_dir = match &raw.artifacts_dir {
        Some(dir) => {
            let path = PathBuf::from(dir);
            if path.is_absolute() {
                return Err(ConfigurationError::AbsoluteArtifactsDir {
                    target: raw.target.clone(),
                    path,
                });
            }
            Some(path)
        }
        None => None,
    };

    if let Some(index) = raw.args.iter().position(|arg| arg.is_empty()) {
        return Err(ConfigurationError::EmptyArg {
            target: raw.target.clone(),
            index,
        });
    }

    let output_dir = match &raw.output_dir {
        Some(dir) => project_root.join(dir),
        None => default_output_dir(project_root, &raw.target, &source_dir),
    };

    // Staging must never write into the source tree.
    if output_dir == source_dir || output_dir.starts_with(&source_dir) {
        return Err(ConfigurationError::OutputInsideSource {
            target: raw.target.clone(),
            path: output_dir,
        });
    }

    // Nor may it contain the source tree: staging replaces the output
    // directory wholesale, which would delete the sources.
    if source_dir.starts_with(&output_dir) {
        return Err(ConfigurationError::SourceInsideOutput {
            target: raw.target.clone(),
            path: output_dir,
        });
    }

    // Output directories are the only filesystem resource shared across
    // targets; they must be pairwise disjoint.
    for other in accepted {
        if output_dir == other.output_dir
            || output_dir.starts_with(&other.output_dir)
            || other.output_dir.starts_with(&output_dir)
        {
            return Err(ConfigurationError::OutputDirConflict {
                first: other.target.clone(),
                second: raw.target.clone(),
                path: output_dir,
            });
        }
    }

    Ok(ProjectSpec {
        target: raw.target.clone(),
        source_dir,
        artifacts_dir,
        output_dir,
        args: raw.args.clone(),
        quiet: raw.quiet,
        optional: raw.optional,
        exclude_dirs: raw.exclude_dirs.clone(),
        env: raw.env.clone(),
    })
}
