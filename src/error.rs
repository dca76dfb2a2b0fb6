//! Error types for frontstage
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration and spec validation errors
///
/// These are always fatal before any pipeline starts and carry the
/// offending target and field so callers can point at the manifest entry.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A required field is missing or empty
    #[error("Project '{target}' is missing required field '{field}'")]
    MissingField { target: String, field: String },

    /// Two projects share the same target name
    #[error("Duplicate target '{target}' in manifest (targets must be unique)")]
    DuplicateTarget { target: String },

    /// Source directory does not exist
    #[error("Source directory for target '{target}' not found: {path}")]
    SourceDirNotFound { target: String, path: PathBuf },

    /// Source directory exists but is not a directory
    #[error("Source directory for target '{target}' is not a directory: {path}")]
    SourceDirNotADirectory { target: String, path: PathBuf },

    /// Source directory has no recognizable project descriptor
    #[error("Source directory for target '{target}' has no package.json: {path}")]
    MissingDescriptor { target: String, path: PathBuf },

    /// Explicit artifacts directory must be relative to source_dir
    #[error("artifacts_dir for target '{target}' must be relative, got: {path}")]
    AbsoluteArtifactsDir { target: String, path: PathBuf },

    /// Empty entry in the extra build arguments
    #[error("Target '{target}' has an empty string in 'args' (position {index})")]
    EmptyArg { target: String, index: usize },

    /// Output directory equals or falls inside the source tree
    #[error("output_dir for target '{target}' is inside its source tree: {path}")]
    OutputInsideSource { target: String, path: PathBuf },

    /// Output directory is an ancestor of the source tree; staging would
    /// remove the sources
    #[error("output_dir for target '{target}' contains its source tree: {path}")]
    SourceInsideOutput { target: String, path: PathBuf },

    /// Two targets would stage into overlapping output directories
    #[error("Targets '{first}' and '{second}' have overlapping output_dir: {path}")]
    OutputDirConflict {
        first: String,
        second: String,
        path: PathBuf,
    },

    /// Manifest file missing
    #[error("No frontstage.toml found at '{path}'")]
    ManifestNotFound { path: PathBuf },

    /// Manifest parse error
    #[error("Failed to parse manifest: {source}")]
    ManifestParse {
        #[source]
        source: toml::de::Error,
    },

    /// Manifest file unreadable
    #[error("Failed to read manifest '{path}': {error}")]
    ManifestRead { path: PathBuf, error: String },
}

/// Errors from running the external dependency/build tool
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The build tool is not on the PATH
    #[error(
        "Unable to execute '{program}' - this package requires Node.js to be \
         installed and npm to be on the PATH"
    )]
    ToolNotFound { program: String },

    /// Process could not be spawned
    #[error("Failed to spawn '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Process I/O failure while capturing output
    #[error("I/O error while running '{program}': {error}")]
    Io { program: String, error: String },

    /// Process exited with a non-zero status
    #[error("Command '{command}' failed with exit code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process was killed after exceeding the timeout
    #[error("Command '{command}' timed out after {seconds}s")]
    TimedOut { command: String, seconds: u64 },
}

/// Artifact detection errors
#[derive(Error, Debug)]
pub enum DetectionError {
    /// An explicitly configured artifacts directory is absent after the build
    #[error("Build for target '{target}' produced no artifacts at configured path: {path}")]
    ExplicitDirMissing { target: String, path: PathBuf },

    /// No framework probe matched with an existing candidate directory
    #[error("No artifacts directory found for target '{target}' (no framework probe matched)")]
    NoArtifacts { target: String },
}

/// Staging (artifact copy) errors
#[derive(Error, Debug)]
pub enum StageError {
    /// Underlying filesystem operation failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Failed to copy one file into the staging tree
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to walk the artifacts tree
    #[error("Failed to read artifacts directory '{path}': {error}")]
    Walk { path: PathBuf, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },
}
