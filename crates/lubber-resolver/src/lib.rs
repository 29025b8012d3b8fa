//! Dependency resolution engine: a registry of pluggable resolvers, a
//! single-pass transitive resolver with version-set intersection, lockfile
//! reconciliation, and the installer that executes the resulting plan.

pub mod coop;
pub mod dependency;
pub mod error;
pub mod graph;
pub mod install;
pub mod provider;
pub mod reconcile;
pub mod registry;
pub mod version;
