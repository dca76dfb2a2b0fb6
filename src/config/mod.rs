//! Configuration and constants
//!
//! Fixed names and defaults used across the crate.

pub mod defaults;
