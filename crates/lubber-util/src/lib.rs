//! Shared utilities for the lubber mod tool.
//!
//! This crate provides cross-cutting concerns used by all other lubber crates:
//! error types, filesystem helpers, content hashing, process spawning and
//! executable lookup, and terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
