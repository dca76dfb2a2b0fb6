//! Default values and well-known names

/// Manifest file name at the project root
pub const MANIFEST_FILE: &str = "frontstage.toml";

/// Project descriptor a frontend source directory must contain
pub const PROJECT_DESCRIPTOR: &str = "package.json";

/// The dependency-cache directory created by the install step.
/// Always excluded from staging and removable by `clean --cache`.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Root of the default staging location, one subdirectory per target.
/// Deliberately not a name frontends commonly use for their source tree,
/// so the derived default stays outside every `source_dir`.
pub const DEFAULT_OUTPUT_ROOT: &str = "staged";

/// Script invoked for the build step (`npm run <script>`)
pub const BUILD_SCRIPT: &str = "build";

/// Environment variable that overrides the npm program
pub const NPM_ENV_VAR: &str = "NPM";

/// Default npm program name, resolved via PATH
pub const DEFAULT_NPM: &str = "npm";

/// Resolve the npm program to invoke, honoring the `NPM` override
pub fn npm_program() -> String {
    std::env::var(NPM_ENV_VAR).unwrap_or_else(|_| DEFAULT_NPM.to_string())
}
