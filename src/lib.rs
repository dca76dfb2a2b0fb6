//! Frontstage - Frontend build orchestrator
//!
//! This library provides the core functionality for building one or more
//! independent frontend projects (npm install + npm run build) and staging
//! their build artifacts into the locations a packaging tool will bundle.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (specs, detection, orchestration, staging)
//! - [`infra`] - Infrastructure layer (external processes, filesystem)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
