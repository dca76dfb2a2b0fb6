//! Artifact staging
//!
//! Copies a detected artifacts directory into the staging destination the
//! packaging step will later bundle. The destination is replaced wholesale,
//! so staging is idempotent and never leaves stale files from an earlier
//! build.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::DEPENDENCY_CACHE_DIR;
use crate::error::StageError;
use crate::infra::filesystem;

/// Result of staging one project's artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    /// Destination that now holds the staged copy
    pub output_dir: PathBuf,
    /// Number of files copied
    pub files_copied: usize,
}

/// Copy `artifacts_dir` into `output_dir`, filtering excluded paths
///
/// The dependency cache is excluded unconditionally; `exclude_dirs` entries
/// match either a file name or a path relative to the artifacts root.
/// Intermediate directories are created as needed.
pub fn stage(
    artifacts_dir: &Path,
    output_dir: &Path,
    exclude_dirs: &[String],
) -> Result<StageResult, StageError> {
    // Replace any previous staged copy for this target.
    filesystem::remove_dir_all(output_dir)?;
    filesystem::create_dir_all(output_dir)?;

    let mut files_copied = 0;

    let walker = WalkDir::new(artifacts_dir)
        .into_iter()
        .filter_entry(|entry| !is_excluded(artifacts_dir, entry.path(), exclude_dirs));

    for entry in walker {
        let entry = entry.map_err(|e| StageError::Walk {
            path: artifacts_dir.to_path_buf(),
            error: e.to_string(),
        })?;

        let rel_path = entry
            .path()
            .strip_prefix(artifacts_dir)
            .unwrap_or_else(|_| Path::new(""));
        if rel_path.as_os_str().is_empty() {
            continue;
        }
        let dest = output_dir.join(rel_path);

        if entry.file_type().is_dir() {
            filesystem::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                filesystem::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &dest).map_err(|e| StageError::CopyFile {
                from: entry.path().to_path_buf(),
                to: dest.clone(),
                error: e.to_string(),
            })?;
            propagate_exec_bits(&dest);
            files_copied += 1;
            tracing::debug!("Copied {} to {}", entry.path().display(), dest.display());
        }
    }

    Ok(StageResult {
        output_dir: output_dir.to_path_buf(),
        files_copied,
    })
}

/// Exclusion rules applied while walking the artifacts tree
fn is_excluded(root: &Path, path: &Path, exclude_dirs: &[String]) -> bool {
    if path == root {
        return false;
    }

    let Ok(rel_path) = path.strip_prefix(root) else {
        return false;
    };

    // The dependency cache is never build output.
    if rel_path
        .components()
        .any(|c| c.as_os_str() == DEPENDENCY_CACHE_DIR)
    {
        return true;
    }

    exclude_dirs.iter().any(|pattern| {
        rel_path == Path::new(pattern)
            || path
                .file_name()
                .is_some_and(|name| name == pattern.as_str())
    })
}

/// Copy read bits to execute bits, so staged tool scripts stay runnable
#[cfg(unix)]
fn propagate_exec_bits(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = std::fs::metadata(path) {
        let mut perms = metadata.permissions();
        let mode = perms.mode();
        perms.set_mode(mode | ((mode & 0o444) >> 2));
        let _ = std::fs::set_permissions(path, perms);
    }
}

#[cfg(not(unix))]
fn propagate_exec_bits(_path: &Path) {}
