//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file or directory exists in the test project
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write the frontstage manifest at the project root
    pub fn write_manifest(&self, content: &str) {
        self.create_file("frontstage.toml", content);
    }

    /// Create a frontend source directory with a Vite signature and a
    /// pre-built dist/ tree, so detection succeeds without a real build
    pub fn add_vite_frontend(&self, name: &str) {
        self.create_file(&format!("{name}/package.json"), "{}");
        self.create_file(&format!("{name}/vite.config.ts"), "export default {}");
        self.create_file(&format!("{name}/dist/index.html"), "<html></html>");
        self.create_file(&format!("{name}/dist/assets/app.js"), "console.log(1)");
    }

    /// Write an executable npm stub that logs its arguments and exits with
    /// the given code; returns the stub's path for the `NPM` override
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn npm_stub(&self, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            "#!/bin/sh\nif [ -n \"$FRONTSTAGE_TEST_LOG\" ]; then echo \"$@\" >> \"$FRONTSTAGE_TEST_LOG\"; fi\nexit {exit_code}\n"
        );
        let path = self.dir.path().join("npm-stub");
        std::fs::write(&path, script).expect("Failed to write npm stub");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod npm stub");
        path
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
