//! Source modules and per-module compile results.

use std::path::PathBuf;

/// A `.lua` file under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    /// Path relative to the source root, `/`-separated on every platform.
    /// This string alone determines compile, bundle and naming order.
    pub relative: String,
    pub path: PathBuf,
}

impl SourceModule {
    /// File name of the compiled object: separators become dots, `c` is
    /// appended (`lib/util.lua` -> `lib.util.luac`).
    pub fn object_name(&self) -> String {
        format!("{}c", self.relative.replace('/', "."))
    }
}

/// Result of one compiler invocation.
#[derive(Debug, Clone)]
pub struct CompileStatus {
    pub success: bool,
    /// Combined compiler stdout/stderr, trimmed.
    pub message: String,
}

impl CompileStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A module that failed to compile. Non-fatal: the build carries on without it.
#[derive(Debug, Clone)]
pub struct CompileWarning {
    pub module: String,
    pub message: String,
}
