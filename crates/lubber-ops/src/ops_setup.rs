//! Environment preflight run before a build starts.

use std::path::PathBuf;

use lubber_core::config::GlobalConfig;
use lubber_util::errors::LubberError;

/// Tools located by a successful preflight.
#[derive(Debug, Clone)]
pub struct PreflightResult {
    pub luac: PathBuf,
}

/// Verify that the external executables a build needs are available.
///
/// `[paths].luac_exe` may be a bare name searched on `PATH` or a path to the
/// binary. Runs before any output is touched, so a missing compiler never
/// leaves a half-cleared output directory behind.
pub fn preflight(config: &GlobalConfig) -> miette::Result<PreflightResult> {
    let exe = &config.paths.luac_exe;
    let luac = which::which(exe).map_err(|e| LubberError::Toolchain {
        message: format!("Lua compiler '{exe}' not found: {e}"),
    })?;
    tracing::debug!("using luac at {}", luac.display());
    Ok(PreflightResult { luac })
}
