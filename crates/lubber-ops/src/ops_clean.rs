//! Operation: remove build output and compiled intermediates.

use std::path::Path;

use lubber_util::errors::LubberError;

use crate::load_project;

/// Remove the output directory and `.lubber/obj`. Installed dependencies and
/// the lockfile are kept.
pub fn clean(project_dir: &Path) -> miette::Result<CleanResult> {
    let project = load_project(project_dir)?;
    let output_dir = project.layout.output_dir(&project.manifest);
    let obj_dir = project.layout.obj_dir();

    let mut cleaned = false;
    for dir in [&output_dir, &obj_dir] {
        if dir.exists() {
            std::fs::remove_dir_all(dir).map_err(LubberError::Io)?;
            cleaned = true;
        }
    }

    Ok(if cleaned {
        CleanResult::Cleaned
    } else {
        CleanResult::NothingToClean
    })
}

/// Result of a clean operation.
#[derive(Debug, PartialEq, Eq)]
pub enum CleanResult {
    Cleaned,
    NothingToClean,
}
