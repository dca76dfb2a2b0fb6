//! Artifact directory detection
//!
//! When a project does not configure `artifacts_dir`, the detector walks a
//! fixed chain of framework probes. Each probe matches a configuration
//! signature in the source tree and proposes a candidate directory; the
//! first probe whose signature matches and whose candidate exists on disk
//! after the build wins. The chain short-circuits, so probe order is the
//! tie-breaker.

use std::path::{Path, PathBuf};

use crate::config::defaults::PROJECT_DESCRIPTOR;
use crate::core::spec::ProjectSpec;
use crate::error::DetectionError;

/// Framework probes, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkProbe {
    /// `vite.config.ts` / `vite.config.js` present
    Vite,
    /// `vue.config.js` present
    VueCli,
    /// `angular.json` present with a build output path
    Angular,
    /// `package.json` with a `build` script
    React,
    /// Any npm project, assuming the common default output
    Fallback,
}

/// The fixed probe chain: Vite before Vue CLI before Angular before React,
/// with the generic fallback last.
pub const PROBE_ORDER: &[FrameworkProbe] = &[
    FrameworkProbe::Vite,
    FrameworkProbe::VueCli,
    FrameworkProbe::Angular,
    FrameworkProbe::React,
    FrameworkProbe::Fallback,
];

impl FrameworkProbe {
    /// Candidate artifacts directory (relative to `source_dir`), or `None`
    /// when the probe's signature does not match
    pub fn candidate(self, source_dir: &Path) -> Option<PathBuf> {
        match self {
            Self::Vite => {
                for ext in ["ts", "js"] {
                    if source_dir.join(format!("vite.config.{ext}")).exists() {
                        return Some(PathBuf::from("dist"));
                    }
                }
                None
            }
            Self::VueCli => source_dir
                .join("vue.config.js")
                .exists()
                .then(|| PathBuf::from("dist")),
            Self::Angular => angular_output_path(source_dir),
            Self::React => {
                let content =
                    std::fs::read_to_string(source_dir.join(PROJECT_DESCRIPTOR)).ok()?;
                let package: serde_json::Value = serde_json::from_str(&content).ok()?;
                let build_script = package.get("scripts")?.get("build")?.as_str()?;
                build_script
                    .contains("build")
                    .then(|| PathBuf::from("build"))
            }
            Self::Fallback => source_dir
                .join(PROJECT_DESCRIPTOR)
                .exists()
                .then(|| PathBuf::from("dist")),
        }
    }
}

/// Output path declared in `angular.json`, if any
///
/// Takes the first project carrying `architect.build.options.outputPath`.
/// Unreadable or malformed JSON does not match the probe.
fn angular_output_path(source_dir: &Path) -> Option<PathBuf> {
    let content = std::fs::read_to_string(source_dir.join("angular.json")).ok()?;
    let config: serde_json::Value = serde_json::from_str(&content).ok()?;

    let projects = config.get("projects")?.as_object()?;
    for project in projects.values() {
        if let Some(output_path) = project
            .get("architect")
            .and_then(|a| a.get("build"))
            .and_then(|b| b.get("options"))
            .and_then(|o| o.get("outputPath"))
            .and_then(|p| p.as_str())
        {
            return Some(PathBuf::from(output_path));
        }
    }
    None
}

/// Determine the artifacts directory for a project after its build
///
/// An explicit `artifacts_dir` is validated to exist and returned verbatim;
/// framework probes are never consulted for it. Otherwise the probe chain
/// runs; no winner is fatal for the target.
pub fn detect(spec: &ProjectSpec) -> Result<PathBuf, DetectionError> {
    if let Some(explicit) = spec.explicit_artifacts_path() {
        if explicit.is_dir() {
            return Ok(explicit);
        }
        return Err(DetectionError::ExplicitDirMissing {
            target: spec.target.clone(),
            path: explicit,
        });
    }

    for probe in PROBE_ORDER {
        if let Some(candidate) = probe.candidate(&spec.source_dir) {
            let path = spec.source_dir.join(candidate);
            if path.is_dir() {
                tracing::debug!(
                    "Detected artifacts for '{}' via {:?}: {}",
                    spec.target,
                    probe,
                    path.display()
                );
                return Ok(path);
            }
        }
    }

    Err(DetectionError::NoArtifacts {
        target: spec.target.clone(),
    })
}
