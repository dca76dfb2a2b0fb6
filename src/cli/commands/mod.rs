//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod validate;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build all configured frontend projects and stage their artifacts
    Build {
        /// Skip the dependency-installation step
        #[arg(long)]
        skip_install: bool,

        /// Remove previously staged output before building
        #[arg(long)]
        clean: bool,

        /// Suppress subprocess output for every project
        #[arg(long)]
        quiet_build: bool,

        /// Kill an install or build invocation after this many seconds
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,
    },

    /// Validate the manifest and project specs without building
    Validate,

    /// Remove staged output
    Clean {
        /// Also remove each project's dependency cache (node_modules)
        #[arg(long)]
        cache: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Build {
                skip_install,
                clean,
                quiet_build,
                timeout,
            } => {
                let current_dir = std::env::current_dir()?;
                let options = build::BuildCliOptions {
                    skip_install,
                    clean_first: clean,
                    quiet_build,
                    timeout_secs: timeout,
                };
                build::execute(&current_dir, options).await
            }
            Self::Validate => {
                let current_dir = std::env::current_dir()?;
                validate::execute(&current_dir).await
            }
            Self::Clean { cache } => {
                let current_dir = std::env::current_dir()?;
                clean::execute(&current_dir, cache).await
            }
        }
    }
}
