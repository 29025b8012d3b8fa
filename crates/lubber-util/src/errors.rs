use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all lubber operations.
#[derive(Debug, Error, Diagnostic)]
pub enum LubberError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed project manifest (`lubber.toml`).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your lubber.toml for syntax errors"))]
    Manifest { message: String },

    /// The manifest parsed but its contents break one or more project rules.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Installing or removing a dependency failed.
    #[error("Install failed: {message}")]
    Install { message: String },

    /// Compiling or bundling Lua bytecode failed.
    #[error("Compilation failed: {message}")]
    Compilation { message: String },

    /// Network request or download failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A required external executable could not be found.
    #[error("Toolchain error: {message}")]
    #[diagnostic(help("Set [paths].luac_exe in ~/.lubber/config.toml or add luac to PATH"))]
    Toolchain { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
