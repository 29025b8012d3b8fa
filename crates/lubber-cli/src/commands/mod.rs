//! Command dispatch and handler modules.

mod build;
mod clean;
mod restore;

use std::path::{Path, PathBuf};

use lubber_core::MANIFEST_FILE;
use lubber_util::errors::LubberError;
use lubber_util::fs::find_ancestor_with;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let project_dir = project_dir(cli.project.as_deref())?;
    match cli.command {
        Command::Restore => restore::exec(&project_dir),
        Command::Build { release } => build::exec(&project_dir, release),
        Command::Clean => clean::exec(&project_dir),
    }
}

/// `--project` when given, else the nearest ancestor holding a manifest,
/// else the current directory.
fn project_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(LubberError::Io)?;
    Ok(match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => find_ancestor_with(&cwd, MANIFEST_FILE).unwrap_or(cwd),
    })
}
