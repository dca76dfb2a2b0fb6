//! Clean logic
//!
//! Removes previously staged output and, on request, the frontend
//! dependency cache. Cleaning an already-clean project succeeds trivially.

use std::path::PathBuf;

use crate::config::defaults::DEPENDENCY_CACHE_DIR;
use crate::core::spec::ProjectSpec;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// What was cleaned for one target
#[derive(Debug, Default, Clone)]
pub struct CleanEntry {
    /// Target name
    pub target: String,
    /// Directories that were removed
    pub removed: Vec<PathBuf>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

/// Aggregate result of a clean run
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Per-target entries, in configuration order
    pub entries: Vec<CleanEntry>,
}

impl CleanReport {
    /// Total number of directories removed across all targets
    pub fn removed_count(&self) -> usize {
        self.entries.iter().map(|e| e.removed.len()).sum()
    }
}

/// Remove staged output for each spec
///
/// With `include_dependency_cache`, the dependency cache under each
/// project's source tree is removed as well. Missing directories are not
/// an error.
pub fn clean(
    specs: &[ProjectSpec],
    include_dependency_cache: bool,
) -> Result<CleanReport, FilesystemError> {
    let mut report = CleanReport::default();

    for spec in specs {
        let mut entry = CleanEntry {
            target: spec.target.clone(),
            ..CleanEntry::default()
        };

        let mut candidates = vec![spec.output_dir.clone()];
        if include_dependency_cache {
            candidates.push(spec.source_dir.join(DEPENDENCY_CACHE_DIR));
        }

        for path in candidates {
            if path.exists() {
                filesystem::remove_dir_all(&path)?;
                tracing::info!("Removed {}", path.display());
                entry.removed.push(path);
            } else {
                entry.skipped.push(path);
            }
        }

        report.entries.push(entry);
    }

    Ok(report)
}
