//! Frontstage CLI - Frontend build orchestrator
//!
//! Entry point for the frontstage command-line application.

use anyhow::Result;
use clap::Parser;

use frontstage::cli::output::display_error;
use frontstage::cli::{Cli, EXIT_BUILD_FAILURE, EXIT_CONFIG_FAILURE};
use frontstage::error::ConfigurationError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber. RUST_LOG wins; otherwise the level
    // follows -q / -v, with subprocess streaming visible by default.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let directives = if cli.quiet {
            "error"
        } else {
            match cli.verbose {
                0 => "warn,frontstage=info",
                1 => "info",
                _ => "debug",
            }
        };
        tracing_subscriber::EnvFilter::new(directives)
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            let code = if e.downcast_ref::<ConfigurationError>().is_some() {
                EXIT_CONFIG_FAILURE
            } else {
                EXIT_BUILD_FAILURE
            };
            std::process::exit(code);
        }
    }
}
