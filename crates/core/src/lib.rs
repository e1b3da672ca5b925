//! Core library for the esactl feature installer
//!
//! This crate contains the feature resolution and installation orchestration
//! logic: parsing feature references from heterogeneous sources, building
//! and combining deduplicated feature sets, validating license acceptance
//! and version compatibility, and choosing between the full and legacy
//! installation strategies.

pub mod dependencies;
pub mod errors;
pub mod feature_ref;
pub mod feature_set;
pub mod installer;
pub mod logging;
pub mod orchestrator;
pub mod runtime;
pub mod server_config;

/// Get the version of the core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
