//! Core business logic module
//!
//! This module contains all business logic for frontstage.
//! Process and filesystem side effects go through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`manifest`] - Manifest (frontstage.toml) parsing
//! - [`spec`] - Project spec model and validation
//! - [`detect`] - Framework-specific artifact directory detection
//! - [`orchestrator`] - Per-project build pipeline and failure policy
//! - [`stage`] - Artifact staging into the package tree
//! - [`clean`] - Staged output and dependency cache removal

pub mod clean;
pub mod detect;
pub mod manifest;
pub mod orchestrator;
pub mod spec;
pub mod stage;
