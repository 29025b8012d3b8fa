//! Structured errors for resolution and installation.
//!
//! Every resolution error carries the consumer chain (the resolution stack at
//! the point of failure, root project first) so diagnostics can show how the
//! failing dependency was reached.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ResolutionError {
    #[error("Dependency '{name}' of '{consumer}' has an invalid version range '{range}': {message}")]
    #[diagnostic(help("use comparators such as '>=1.0.0', '<2.0.0' or '^1.2.0', separated by commas"))]
    InvalidRange {
        name: String,
        range: String,
        message: String,
        consumer: String,
        chain: Vec<String>,
    },

    #[error("Dependency '{name}' of '{consumer}' couldn't be found.")]
    #[diagnostic(help("check the spelling, or pin a provider with a 'provider:' prefix"))]
    NotFound {
        name: String,
        consumer: String,
        chain: Vec<String>,
    },

    #[error("Dependency '{name}' of '{consumer}' was found, but no version matched {range}.")]
    NoMatchingVersion {
        name: String,
        range: String,
        consumer: String,
        chain: Vec<String>,
    },

    #[error("Dependency '{name} ({range})' of '{consumer}' is not compatible with '{name} ({previous})'.")]
    #[diagnostic(help("relax one of the two version ranges so they overlap"))]
    IncompatibleRange {
        name: String,
        range: String,
        previous: String,
        consumer: String,
        chain: Vec<String>,
    },

    #[error("Dependency '{name}' from '{existing_provider}' (needed by '{existing_consumer}') is not compatible with '{name}' from '{requested_provider}' (needed by '{consumer}').")]
    ProviderConflict {
        name: String,
        existing_provider: String,
        existing_consumer: String,
        requested_provider: String,
        consumer: String,
        chain: Vec<String>,
    },

    #[error("Cyclic dependency! ({})", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("Dependency '{name}' of '{consumer}' asks for unknown provider '{provider}'.")]
    UnknownProvider {
        provider: String,
        name: String,
        consumer: String,
        chain: Vec<String>,
    },

    #[error("Provider '{provider}' failed while resolving '{name}': {message}")]
    Provider {
        provider: String,
        name: String,
        message: String,
        chain: Vec<String>,
    },
}

impl ResolutionError {
    /// The consumer chain active when resolution failed.
    pub fn chain(&self) -> &[String] {
        match self {
            Self::InvalidRange { chain, .. }
            | Self::NotFound { chain, .. }
            | Self::NoMatchingVersion { chain, .. }
            | Self::IncompatibleRange { chain, .. }
            | Self::ProviderConflict { chain, .. }
            | Self::Cycle { chain }
            | Self::UnknownProvider { chain, .. }
            | Self::Provider { chain, .. } => chain,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum InstallError {
    #[error("Invalid resolver '{provider}' during install of '{name}'.")]
    UnknownProvider { provider: String, name: String },

    #[error("Dependency '{name}' has no selected version to install.")]
    NoVersion { name: String },

    #[error("Refusing to install '{name}' into non-empty directory {}", .path.display())]
    #[diagnostic(help("delete the directory and run restore again"))]
    DestinationNotEmpty { name: String, path: PathBuf },

    #[error("Error while installing {name}@{version}: {message}")]
    Failed {
        name: String,
        version: String,
        message: String,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
