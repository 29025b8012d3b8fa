//! Core data types for the lubber mod tool.
//!
//! This crate defines the types that describe a mod project: the
//! `lubber.toml` manifest, dependency references, the lockfile, the global
//! user configuration, the on-disk project layout, and manifest validation.
//!
//! This crate is intentionally free of network I/O.

/// File name of the project manifest at the project root.
pub const MANIFEST_FILE: &str = "lubber.toml";

/// Name of the game engine dependency every mod must declare.
pub const ENGINE_DEPENDENCY: &str = "sm64coopdx";

pub mod config;
pub mod dependency;
pub mod layout;
pub mod lockfile;
pub mod manifest;
pub mod validate;
